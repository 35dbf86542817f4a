/// Headers of a single multipart segment that matter for classification.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct PartHeaders<'a> {
    pub has_disposition: bool,
    pub name: Option<&'a str>,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
}

/// Parse a raw header block (everything before the blank line of a segment).
///
/// Lines may end in CRLF or a bare LF. Lines that are not valid UTF-8 or carry
/// no `:` are ignored.
pub(crate) fn parse_part_headers(block: &[u8]) -> PartHeaders<'_> {
    let mut headers = PartHeaders::default();

    for raw_line in block.split(|&b| b == b'\n') {
        let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);
        let Ok(line) = std::str::from_utf8(raw_line) else {
            continue;
        };
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.eq_ignore_ascii_case("content-disposition") {
            headers.has_disposition = true;
            for (param, param_value) in parameters(value) {
                if param.eq_ignore_ascii_case("name") {
                    headers.name = Some(param_value);
                } else if param.eq_ignore_ascii_case("filename") {
                    headers.filename = Some(param_value);
                }
            }
        } else if key.eq_ignore_ascii_case("content-type") {
            headers.content_type = Some(value.trim());
        }
    }

    headers
}

/// Split the `; key=value` parameters that follow a header's primary value.
///
/// Quoted values keep any `;` they contain and are returned without quotes.
pub(crate) fn parameters(value: &str) -> Vec<(&str, &str)> {
    let mut params = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut pieces = Vec::new();

    for (idx, ch) in value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                pieces.push(&value[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(&value[start..]);

    // The first piece is the primary value (`form-data`, `multipart/form-data`).
    for piece in pieces.into_iter().skip(1) {
        let Some((key, raw)) = piece.split_once('=') else {
            continue;
        };
        let raw = raw.trim();
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(raw);
        params.push((key.trim(), unquoted));
    }

    params
}
