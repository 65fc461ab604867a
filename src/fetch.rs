use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tracing::debug;

/// Downloads the body at `url` with a blocking request.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads raw bytes from a local path or an `http(s)` URL, gunzipping `.gz` sources.
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(source).with_context(|| format!("failed to fetch '{source}'"))?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read '{source}'"))?
    };
    debug!(source, bytes = bytes.len(), "Source loaded");

    if source.ends_with(".gz") {
        return gunzip(&bytes).with_context(|| format!("failed to decompress '{source}'"));
    }

    Ok(bytes)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
