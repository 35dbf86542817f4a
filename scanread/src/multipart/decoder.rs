use memchr::memmem;
use tracing::debug;

use super::form::{FileAttachment, ParsedForm, DEFAULT_CONTENT_TYPE, UNKNOWN_FILENAME};
use super::headers::{parameters, parse_part_headers};
use crate::error::{Result, ScanError};

const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Extract the boundary token from a `Content-Type` header value.
///
/// Returns `None` unless the media type is `multipart/form-data` and carries
/// a non-empty `boundary` parameter. Quoted boundaries are unquoted.
pub fn boundary_from_content_type(content_type: &str) -> Option<String> {
    let media_type = content_type.split(';').next()?.trim();
    if !media_type.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }

    parameters(content_type)
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("boundary"))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Decode a fully buffered `multipart/form-data` body.
///
/// The body is split on every occurrence of the literal `--<boundary>`. Bytes
/// inside a file that happen to spell the delimiter are not escaped and will
/// split that file. Segments without a `Content-Disposition` header (preamble,
/// the closing `--`, epilogue) or without a `name` are skipped.
///
/// # Errors
///
/// `ScanError::MalformedRequest` when `boundary` is missing or empty, or when
/// the delimiter never occurs in `body`. No partial form is returned.
pub fn decode(body: &[u8], boundary: Option<&str>) -> Result<ParsedForm> {
    let boundary = match boundary {
        Some(b) if !b.is_empty() => b,
        _ => {
            return Err(ScanError::MalformedRequest(
                "Missing multipart boundary in Content-Type header".to_string(),
            ))
        }
    };

    let delimiter = format!("--{boundary}");
    let finder = memmem::Finder::new(delimiter.as_bytes());
    let offsets: Vec<usize> = finder.find_iter(body).collect();

    if offsets.is_empty() {
        return Err(ScanError::MalformedRequest(format!(
            "Body does not contain the multipart delimiter `{delimiter}`"
        )));
    }

    let mut form = ParsedForm::default();
    let mut start = 0;
    for end in offsets.iter().copied().chain(std::iter::once(body.len())) {
        classify_segment(&body[start..end], &mut form);
        start = end + delimiter.len();
    }

    debug!(
        segments = offsets.len() + 1,
        fields = form.fields.len(),
        files = form.files.len(),
        "Decoded multipart body"
    );

    Ok(form)
}

fn classify_segment(segment: &[u8], form: &mut ParsedForm) {
    let (header_block, value) = match memmem::find(segment, HEADER_SEPARATOR) {
        Some(idx) => (&segment[..idx], &segment[idx + HEADER_SEPARATOR.len()..]),
        None => (segment, &[][..]),
    };

    let headers = parse_part_headers(header_block);
    if !headers.has_disposition {
        return;
    }

    let Some(name) = headers.name.filter(|n| !n.is_empty()) else {
        debug!("Skipping multipart part without a name");
        return;
    };

    match headers.filename {
        Some(filename) => {
            let filename = if filename.is_empty() {
                UNKNOWN_FILENAME
            } else {
                filename
            };
            let content_type = headers
                .content_type
                .filter(|ct| !ct.is_empty())
                .unwrap_or(DEFAULT_CONTENT_TYPE);

            form.insert_file(
                name.to_string(),
                FileAttachment {
                    filename: filename.to_string(),
                    content_type: content_type.to_string(),
                    bytes: strip_line_break(value).to_vec(),
                },
            );
        }
        None => {
            let text = String::from_utf8_lossy(trim_control(value)).into_owned();
            form.insert_field(name.to_string(), text);
        }
    }
}

/// Drop the single line break that precedes the next delimiter.
///
/// File payloads are binary, so only the framing CRLF is removed. A payload
/// that itself ends in whitespace keeps it.
fn strip_line_break(value: &[u8]) -> &[u8] {
    value
        .strip_suffix(b"\r\n")
        .or_else(|| value.strip_suffix(b"\n"))
        .unwrap_or(value)
}

fn trim_control(value: &[u8]) -> &[u8] {
    let is_padding = |b: &u8| b.is_ascii_whitespace() || b.is_ascii_control();
    let start = value.iter().position(|b| !is_padding(b)).unwrap_or(value.len());
    let end = value
        .iter()
        .rposition(|b| !is_padding(b))
        .map_or(start, |idx| idx + 1);
    &value[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn test_boundary_from_plain_header() {
        assert_eq!(
            boundary_from_content_type("multipart/form-data; boundary=XYZ"),
            Some("XYZ".to_string())
        );
    }

    #[test]
    fn test_boundary_from_quoted_mixed_case_header() {
        assert_eq!(
            boundary_from_content_type("Multipart/Form-Data; charset=utf-8; Boundary=\"a b+c\""),
            Some("a b+c".to_string())
        );
    }

    #[test]
    fn test_boundary_missing_or_wrong_type() {
        assert_eq!(boundary_from_content_type("multipart/form-data"), None);
        assert_eq!(boundary_from_content_type("multipart/form-data; boundary="), None);
        assert_eq!(boundary_from_content_type("application/json; boundary=XYZ"), None);
        assert_eq!(boundary_from_content_type("multipart/mixed; boundary=x"), None);
    }

    #[test]
    fn test_decode_without_boundary_fails() {
        let result = decode(b"--XYZ\r\n", None);
        assert!(matches!(result, Err(ScanError::MalformedRequest(_))));

        let result = decode(b"--XYZ\r\n", Some(""));
        assert!(matches!(result, Err(ScanError::MalformedRequest(_))));
    }

    #[test]
    fn test_decode_without_any_delimiter_fails() {
        let result = decode(b"just some bytes", Some("XYZ"));
        assert!(matches!(result, Err(ScanError::MalformedRequest(_))));
    }

    #[test]
    fn test_decode_field_and_file() {
        let raw = body(&[
            b"--XYZ\r\n",
            b"Content-Disposition: form-data; name=\"language\"\r\n\r\n",
            b"lav\r\n",
            b"--XYZ\r\n",
            b"Content-Disposition: form-data; name=\"image\"; filename=\"scan.png\"\r\n",
            b"Content-Type: image/png\r\n\r\n",
            &[0xFF, 0xD8, 0x00, 0x0D, 0x0A, 0x42],
            b"\r\n--XYZ--\r\n",
        ]);

        let form = decode(&raw, Some("XYZ")).unwrap();

        assert_eq!(form.field("language"), Some("lav"));
        let image = form.file("image").unwrap();
        assert_eq!(image.filename, "scan.png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, vec![0xFF, 0xD8, 0x00, 0x0D, 0x0A, 0x42]);
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn test_file_defaults() {
        let raw = body(&[
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"image\"; filename=\"\"\r\n\r\n",
            b"data\r\n",
            b"--b--\r\n",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        let image = form.file("image").unwrap();
        assert_eq!(image.filename, UNKNOWN_FILENAME);
        assert_eq!(image.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(image.bytes, b"data".to_vec());
    }

    #[test]
    fn test_empty_field_value() {
        let raw = body(&[
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"mode\"\r\n\r\n",
            b"\r\n",
            b"--b--\r\n",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        assert_eq!(form.field("mode"), Some(""));
    }

    #[test]
    fn test_part_without_separator_has_empty_value() {
        let raw = body(&[
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"mode\"\r\n",
            b"--b--\r\n",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        assert_eq!(form.field("mode"), Some(""));
    }

    #[test]
    fn test_preamble_epilogue_and_nameless_parts_are_skipped() {
        let raw = body(&[
            b"This is the preamble.\r\n",
            b"--b\r\n",
            b"Content-Type: text/plain\r\n\r\n",
            b"no disposition\r\n",
            b"--b\r\n",
            b"Content-Disposition: form-data\r\n\r\n",
            b"no name\r\n",
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"mode\"\r\n\r\n",
            b"advanced\r\n",
            b"--b--\r\n",
            b"epilogue",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        assert_eq!(form.len(), 1);
        assert_eq!(form.field("mode"), Some("advanced"));
    }

    #[test]
    fn test_boundary_with_regex_metacharacters_is_literal() {
        let boundary = "a.*+?(b)[c]|^$";
        let raw = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"mode\"\r\n\r\nfast\r\n--{boundary}--\r\n"
        );

        let form = decode(raw.as_bytes(), Some(boundary)).unwrap();
        assert_eq!(form.field("mode"), Some("fast"));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let raw = body(&[
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"mode\"\r\n\r\n",
            b"fast\r\n",
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"mode\"\r\n\r\n",
            b"handwriting\r\n",
            b"--b--\r\n",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        assert_eq!(form.field("mode"), Some("handwriting"));
    }

    #[test]
    fn test_field_value_is_trimmed() {
        let raw = body(&[
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"language\"\r\n\r\n",
            b"  rus \t\r\n",
            b"--b--\r\n",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        assert_eq!(form.field("language"), Some("rus"));
    }

    #[test]
    fn test_delimiter_inside_payload_splits_the_file() {
        let raw = body(&[
            b"--b\r\n",
            b"Content-Disposition: form-data; name=\"image\"; filename=\"x.bin\"\r\n\r\n",
            b"abc--bdef\r\n",
            b"--b--\r\n",
        ]);

        let form = decode(&raw, Some("b")).unwrap();
        assert_eq!(form.file("image").unwrap().bytes, b"abc".to_vec());
    }

    #[test]
    fn test_trim_control() {
        assert_eq!(trim_control(b"\r\n\0 x y \x07\r\n"), b"x y");
        assert_eq!(trim_control(b"\r\n"), b"");
        assert_eq!(trim_control(b""), b"");
    }

    #[test]
    fn test_strip_line_break() {
        assert_eq!(strip_line_break(b"ab\r\n"), b"ab");
        assert_eq!(strip_line_break(b"ab\n"), b"ab");
        assert_eq!(strip_line_break(b"ab \r\n\r\n"), b"ab \r\n");
    }
}
