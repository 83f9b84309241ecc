//! Text encodings for the read, write and append helpers.
//!
//! Encoding never writes a byte order mark. Decoding drops a leading mark
//! that matches the chosen encoding and rejects malformed input instead of
//! substituting replacement characters.

use encoding_rs::{DecoderResult, UTF_8, UTF_16BE, UTF_16LE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    /// 7-bit ASCII. Characters outside it are written as `?`.
    Ascii,
}

impl TextEncoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf32Le => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
            Self::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }

    /// `None` when `bytes` is not valid text in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let mut text = String::new();
        self.decoder()
            .decode(bytes, &mut text, true)
            .then_some(text)
    }

    pub(crate) fn decoder(self) -> TextDecoder {
        let kind = match self {
            Self::Utf8 => DecoderKind::Whatwg(UTF_8.new_decoder_with_bom_removal()),
            Self::Utf16Le => DecoderKind::Whatwg(UTF_16LE.new_decoder_with_bom_removal()),
            Self::Utf16Be => DecoderKind::Whatwg(UTF_16BE.new_decoder_with_bom_removal()),
            Self::Utf32Le => DecoderKind::Utf32 {
                carry:   Vec::with_capacity(4),
                started: false,
            },
            Self::Ascii => DecoderKind::Ascii,
        };
        TextDecoder { kind }
    }
}

/// Incremental decoder; a character may be split across chunks.
pub(crate) struct TextDecoder {
    kind: DecoderKind,
}

enum DecoderKind {
    Whatwg(encoding_rs::Decoder),
    Utf32 { carry: Vec<u8>, started: bool },
    Ascii,
}

impl TextDecoder {
    /// Append the text decoded from `src` to `dst`. `last` marks the end of
    /// input. Returns `false` on malformed input.
    pub(crate) fn decode(&mut self, src: &[u8], dst: &mut String, last: bool) -> bool {
        match &mut self.kind {
            DecoderKind::Whatwg(decoder) => decode_whatwg(decoder, src, dst, last),
            DecoderKind::Utf32 { carry, started } => decode_utf32(carry, started, src, dst, last),
            DecoderKind::Ascii => {
                if !src.is_ascii() {
                    return false;
                }
                dst.extend(src.iter().map(|&b| b as char));
                true
            }
        }
    }
}

fn decode_whatwg(
    decoder: &mut encoding_rs::Decoder,
    mut src: &[u8],
    dst: &mut String,
    last: bool,
) -> bool {
    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .unwrap_or(src.len().saturating_mul(3));
        dst.reserve(needed.max(4));

        let (result, read) = decoder.decode_to_string_without_replacement(src, dst, last);
        src = &src[read..];
        match result {
            DecoderResult::InputEmpty => return true,
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(_, _) => return false,
        }
    }
}

fn decode_utf32(
    carry: &mut Vec<u8>,
    started: &mut bool,
    src: &[u8],
    dst: &mut String,
    last: bool,
) -> bool {
    carry.extend_from_slice(src);
    let whole = carry.len() - carry.len() % 4;

    for unit in carry[..whole].chunks_exact(4) {
        let value = u32::from_le_bytes([unit[0], unit[1], unit[2], unit[3]]);
        let first = !*started;
        *started = true;
        if first && value == 0xFEFF {
            continue;
        }
        match char::from_u32(value) {
            Some(c) => dst.push(c),
            None => return false,
        }
    }

    carry.drain(..whole);
    !(last && !carry.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TextEncoding; 5] = [
        TextEncoding::Utf8,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
        TextEncoding::Utf32Le,
        TextEncoding::Ascii,
    ];

    #[test]
    fn test_roundtrip_every_encoding() {
        for encoding in ALL {
            let text = "plain text\r\nsecond line";
            let bytes = encoding.encode(text);
            assert_eq!(encoding.decode(&bytes).as_deref(), Some(text), "{encoding:?}");
        }
    }

    #[test]
    fn test_unicode_roundtrip() {
        let text = "naïve café 🦀";
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Le,
            TextEncoding::Utf16Be,
            TextEncoding::Utf32Le,
        ] {
            assert_eq!(encoding.decode(&encoding.encode(text)).as_deref(), Some(text));
        }
    }

    #[test]
    fn test_byte_layout() {
        assert_eq!(TextEncoding::Utf16Le.encode("A"), [0x41, 0x00]);
        assert_eq!(TextEncoding::Utf16Be.encode("A"), [0x00, 0x41]);
        assert_eq!(TextEncoding::Utf32Le.encode("A"), [0x41, 0, 0, 0]);
        assert_eq!(TextEncoding::Ascii.encode("é!"), b"?!");
    }

    #[test]
    fn test_leading_mark_dropped() {
        assert_eq!(TextEncoding::Utf8.decode(b"\xEF\xBB\xBFhi").as_deref(), Some("hi"));
        assert_eq!(TextEncoding::Utf16Le.decode(&[0xFF, 0xFE, 0x68, 0x00]).as_deref(), Some("h"));
        assert_eq!(TextEncoding::Utf16Be.decode(&[0xFE, 0xFF, 0x00, 0x68]).as_deref(), Some("h"));
        assert_eq!(
            TextEncoding::Utf32Le.decode(&[0xFF, 0xFE, 0, 0, 0x68, 0, 0, 0]).as_deref(),
            Some("h")
        );
    }

    #[test]
    fn test_malformed_rejected() {
        assert_eq!(TextEncoding::Utf8.decode(&[0xC3]), None);
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x41]), None);
        assert_eq!(TextEncoding::Utf32Le.decode(&[0x41, 0, 0]), None);
        assert_eq!(TextEncoding::Utf32Le.decode(&[0x00, 0xD8, 0, 0]), None);
        assert_eq!(TextEncoding::Ascii.decode(&[0x80]), None);
    }

    #[test]
    fn test_split_character_across_chunks() {
        let bytes = TextEncoding::Utf32Le.encode("ab");
        let mut decoder = TextEncoding::Utf32Le.decoder();
        let mut text = String::new();
        assert!(decoder.decode(&bytes[..3], &mut text, false));
        assert!(decoder.decode(&bytes[3..6], &mut text, false));
        assert!(decoder.decode(&bytes[6..], &mut text, true));
        assert_eq!(text, "ab");

        let bytes = TextEncoding::Utf16Le.encode("🦀");
        let mut decoder = TextEncoding::Utf16Le.decoder();
        let mut text = String::new();
        assert!(decoder.decode(&bytes[..1], &mut text, false));
        assert!(decoder.decode(&bytes[1..], &mut text, true));
        assert_eq!(text, "🦀");
    }
}
