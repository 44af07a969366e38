// File: crates/screener-chart/src/output.rs
// Summary: Encoded chart image handed back to the host, with text transports.

use base64::Engine as _;

/// PNG-encoded chart. Hosts pick the transport: raw bytes for binary
/// responses, base64 or a `data:` URI for text-based embedding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl PngImage {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self { bytes, width, height }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Standard (padded) base64 of the PNG bytes.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// `data:image/png;base64,...`, ready for an `<img src>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.to_base64())
    }
}

impl AsRef<[u8]> for PngImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
