use chardetng::EncodingDetector;

use crate::error::CheckError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug)]
pub struct DecodedPayload {
    pub text: String,
    pub encoding: &'static str,
}

/// Turns the raw dataset body into text.
///
/// UTF-8 (with or without BOM) is taken as is. Anything else goes through
/// chardetng, which for this dataset usually means windows-1251.
pub fn decode_payload(bytes: &[u8]) -> Result<DecodedPayload, CheckError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(body) {
        return Ok(DecodedPayload {
            text: text.to_string(),
            encoding: "UTF-8",
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(CheckError::decode(format!(
            "payload is not valid {}",
            encoding.name()
        )));
    }

    Ok(DecodedPayload {
        text: text.into_owned(),
        encoding: encoding.name(),
    })
}
