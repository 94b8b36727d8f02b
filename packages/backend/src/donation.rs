//! Donation amounts and the PIX payload request.

use crate::client::Backend;
use crate::error::BackendError;
use crate::models::PixRequest;

/// Parse a donation amount typed by a visitor.
///
/// Accepts `10`, `10.5` and the Brazilian `10,50`. The value is rounded to
/// cents first; anything that is not above zero after rounding is rejected
/// before a request can be made.
pub fn parse_amount(input: &str) -> Result<f64, BackendError> {
    let normalized = input.trim().replace(',', ".");
    let value = normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v * 100.0).round() / 100.0);
    match value {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(BackendError::Invalid("Digite um valor válido".to_string())),
    }
}

/// Format a value as Brazilian reais: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut whole = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            whole.push('.');
        }
        whole.push(ch);
    }

    format!("{}R$\u{a0}{},{:02}", sign, whole, cents % 100)
}

/// Ask the backend for the PIX payload of a donation to `user_id`.
pub async fn request_pix<B: Backend>(
    backend: &B,
    user_id: &str,
    amount: f64,
) -> Result<String, BackendError> {
    if !amount.is_finite() || (amount * 100.0).round() <= 0.0 {
        return Err(BackendError::Invalid("Digite um valor válido".to_string()));
    }
    if user_id.trim().is_empty() {
        return Err(BackendError::Invalid("Usuário não encontrado".to_string()));
    }

    let request = PixRequest {
        user_id: user_id.to_string(),
        value: amount,
    };
    let response = backend.pix_payload(&request).await?;
    Ok(response.payload)
}
