use actix_multipart::{Field, Multipart};
use actix_web::HttpRequest;
use futures::TryStreamExt;
use gbp_engine::{
    db_types::{NewReceipt, MAX_RECEIPT_SIZE},
    order_objects::OrderSubmission,
};
use log::*;

use crate::errors::ServerError;

pub const BROWSER_ID_HEADER: &str = "gbp_browser_id";
pub const BROWSER_ID_COOKIE: &str = "browserId";

/// Text fields longer than this are refused outright.
const MAX_TEXT_FIELD_SIZE: usize = 4096;

/// The visitor's browser id, from the `gbp_browser_id` header or else the `browserId` cookie.
pub fn get_browser_id(req: &HttpRequest) -> Result<String, ServerError> {
    let from_header = req.headers().get(BROWSER_ID_HEADER).and_then(|v| v.to_str().ok()).map(|s| s.trim().to_string());
    from_header
        .or_else(|| req.cookie(BROWSER_ID_COOKIE).map(|c| c.value().trim().to_string()))
        .filter(|id| !id.is_empty())
        .ok_or(ServerError::MissingBrowserId)
}

/// Reads the checkout form.
///
/// Unknown fields are ignored. Only the structure of the form is checked here; the order details themselves are
/// validated by the order flow.
pub async fn read_order_form(mut payload: Multipart) -> Result<OrderSubmission, ServerError> {
    let mut submission = OrderSubmission::default();
    let mut card_id = None;
    while let Some(mut field) = payload.try_next().await.map_err(|e| ServerError::InvalidRequestBody(e.to_string()))? {
        let name = field.name().to_string();
        match name.as_str() {
            "receipt" => {
                let file_name = field.content_disposition().get_filename().unwrap_or("receipt").to_string();
                let mime_type = field.content_type().map(|m| m.essence_str().to_string()).unwrap_or_default();
                let data = read_bytes(&mut field, MAX_RECEIPT_SIZE).await?;
                trace!("💻️ Received receipt {file_name} ({mime_type}, {} bytes)", data.len());
                submission.receipt = Some(NewReceipt::new(file_name, mime_type, data));
            },
            "cardId" => {
                let value = read_text(&mut field).await?;
                let id = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| ServerError::InvalidRequestBody(format!("'{value}' is not a valid card id. {e}")))?;
                card_id = Some(id);
            },
            "fullName" => submission.full_name = read_text(&mut field).await?,
            "email" => submission.email = read_text(&mut field).await?,
            "accountNumber" => submission.account_number = read_text(&mut field).await?,
            "gbpId" => submission.gbp_id = Some(read_text(&mut field).await?),
            "cryptoSymbol" => submission.crypto_symbol = read_text(&mut field).await?,
            "cryptoAmount" => {
                let value = read_text(&mut field).await?;
                submission.client_amount = match value.trim() {
                    "" => None,
                    v => Some(v.parse::<f64>().map_err(|e| {
                        ServerError::InvalidRequestBody(format!("'{v}' is not a valid crypto amount. {e}"))
                    })?),
                };
            },
            other => {
                debug!("💻️ Ignoring unexpected form field '{other}'");
                read_bytes(&mut field, 0).await?;
            },
        }
    }
    submission.card_id = card_id.ok_or_else(|| ServerError::validation("A card must be selected"))?;
    Ok(submission)
}

async fn read_text(field: &mut Field) -> Result<String, ServerError> {
    let bytes = read_bytes(field, MAX_TEXT_FIELD_SIZE).await?;
    if bytes.len() > MAX_TEXT_FIELD_SIZE {
        return Err(ServerError::InvalidRequestBody(format!("The {} field is too long", field.name())));
    }
    String::from_utf8(bytes).map_err(|e| ServerError::InvalidRequestBody(e.to_string()))
}

/// Reads the whole field. At most `limit + 1` bytes are kept, so that callers can tell an oversize field from one that
/// is exactly at the limit, and the rest is drained.
async fn read_bytes(field: &mut Field, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(|e| ServerError::InvalidRequestBody(e.to_string()))? {
        let room = (limit + 1).saturating_sub(data.len());
        data.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }
    Ok(data)
}
