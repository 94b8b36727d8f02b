use api::SocialLink;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_brands_icons::{FaInstagram, FaSpotify, FaYoutube};

use super::SettingsDraft;
use crate::icons::FaLink;
use crate::Icon;

#[component]
pub fn SocialLinksForm(draft: Signal<SettingsDraft>) -> Element {
    let mut draft = draft;

    rsx! {
        article {
            class: "card settings-section",
            h2 {
                Icon { icon: FaLink, width: 16, height: 16 }
                span { "Redes Sociais" }
            }
            p { class: "muted", "Conecte suas redes sociais e portfólios" }

            div {
                class: "form-grid",
                for link in SocialLink::ALL {
                    div {
                        key: "{link.slot()}",
                        class: "form-field",
                        label {
                            r#for: "settings-link-{link.slot()}",
                            match link {
                                SocialLink::Instagram => rsx! { Icon { icon: FaInstagram, width: 12, height: 12 } },
                                SocialLink::Spotify => rsx! { Icon { icon: FaSpotify, width: 12, height: 12 } },
                                SocialLink::YouTube => rsx! { Icon { icon: FaYoutube, width: 12, height: 12 } },
                            }
                            "{link.label()}"
                        }
                        input {
                            id: "settings-link-{link.slot()}",
                            r#type: "url",
                            placeholder: link.placeholder(),
                            value: draft.read().link(link).to_string(),
                            oninput: move |evt| draft.write().set_link(link, evt.value()),
                        }
                    }
                }
            }
        }
    }
}
