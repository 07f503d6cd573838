//! Middleware verifying the platform's request signatures

use anyhow::{Context, Result};
use axum::{
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use ed25519_dalek::{Signature, Verifier as _, VerifyingKey};
use tracing::warn;

use crate::{error::BotError, state::AppState};

const SIGNATURE_HEADER: &str = "x-signature-ed25519";
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Largest interaction body accepted
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Ed25519 verifier for the application's public key
#[derive(Debug, Clone)]
pub struct Verifier {
    key: VerifyingKey,
}

impl Verifier {
    /// Build a verifier from a hex-encoded public key
    pub fn from_hex(public_key: &str) -> Result<Self> {
        let bytes: [u8; 32] = hex::decode(public_key.trim())
            .context("Public key is not valid hex")?
            .try_into()
            .map_err(|_| anyhow::anyhow!("Public key must be 32 bytes"))?;
        let key =
            VerifyingKey::from_bytes(&bytes).context("Public key is not a valid Ed25519 key")?;

        Ok(Verifier { key })
    }

    /// Check `signature` (hex) over `timestamp` followed by `body`
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool {
        let Ok(signature) = hex::decode(signature) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&signature) else {
            return false;
        };

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify(&message, &signature).is_ok()
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Reject requests whose signature does not match the configured key
pub async fn verify_signature(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, BotError> {
    let (parts, body) = req.into_parts();

    let signature = header(&parts.headers, SIGNATURE_HEADER).ok_or(BotError::InvalidSignature)?;
    let timestamp = header(&parts.headers, TIMESTAMP_HEADER).ok_or(BotError::InvalidSignature)?;

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| BotError::BadRequest(format!("Unreadable body: {}", e)))?;

    if !state.verifier.verify(signature, timestamp, &bytes) {
        warn!("Rejected interaction with an invalid signature");
        return Err(BotError::InvalidSignature);
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
