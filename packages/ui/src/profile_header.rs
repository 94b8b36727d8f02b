//! Public profile card: avatar, name, bio, social links and the donation button.

use api::{PublicProfile, SocialLink};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_brands_icons::{FaInstagram, FaSpotify, FaYoutube};

use crate::pix_donation::PixDonation;
use crate::Icon;

/// Shown when the artist has not picked an avatar.
pub const DEFAULT_AVATAR: &str = "/avatars/default.svg";

pub const ARTIST_NAME_FALLBACK: &str = "Nome do Artista";

pub const BIO_FALLBACK: &str = "Esta pessoa ainda não possui uma biografia configurada.";

#[component]
pub fn ProfileHeader(user_id: String, profile: PublicProfile) -> Element {
    let avatar = profile
        .user_avatar
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    let artist_name = profile.artist_name.clone().filter(|n| !n.trim().is_empty());
    let display_name = artist_name.clone().unwrap_or_else(|| ARTIST_NAME_FALLBACK.to_string());
    let bio = profile
        .bio
        .clone()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| BIO_FALLBACK.to_string());
    let links = profile.links();

    rsx! {
        header {
            class: "card profile-header",
            article {
                class: "profile-header-body",
                img {
                    class: "avatar avatar--large",
                    src: "{avatar}",
                    alt: "Avatar de {display_name}",
                }
                div {
                    class: "profile-header-text",
                    h1 { "{display_name}" }
                    p { class: "profile-bio", "{bio}" }
                    if !links.is_empty() {
                        div {
                            class: "profile-links",
                            for (link, url) in links {
                                a {
                                    key: "{link.slot()}",
                                    href: "{url}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    title: link.label(),
                                    {link_icon(link)}
                                }
                            }
                        }
                    }
                }
                PixDonation { user_id, artist_name }
            }
        }
    }
}

fn link_icon(link: SocialLink) -> Element {
    match link {
        SocialLink::Instagram => rsx! { Icon { icon: FaInstagram, width: 22, height: 22 } },
        SocialLink::Spotify => rsx! { Icon { icon: FaSpotify, width: 22, height: 22 } },
        SocialLink::YouTube => rsx! { Icon { icon: FaYoutube, width: 22, height: 22 } },
    }
}
