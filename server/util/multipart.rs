/// One part of a `multipart/form-data` body, borrowing from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part<'a> {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub data: &'a [u8],
}

impl Part<'_> {
    pub fn is_file(&self) -> bool {
        self.filename.is_some()
    }
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`.
fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut pieces = Vec::new();
    let mut rest = haystack;
    while let Some(pos) = find_subsequence(rest, needle) {
        pieces.push(&rest[..pos]);
        rest = &rest[pos + needle.len()..];
    }
    pieces.push(rest);
    pieces
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Reads `key="value"` out of a Content-Disposition header line.
fn disposition_param(headers: &str, key: &str) -> Option<String> {
    let needle = format!("{}=\"", key);
    let mut search = headers;
    loop {
        let pos = search.find(&needle)?;
        // `name="` also matches inside `filename="`; require a separator before it.
        let boundary_ok = pos == 0 || matches!(search.as_bytes()[pos - 1], b' ' | b';');
        let rest = &search[pos + needle.len()..];
        if boundary_ok {
            let end = rest.find('"')?;
            return Some(rest[..end].to_owned());
        }
        search = rest;
    }
}

/// Splits a multipart body into its parts. Preamble, epilogue and parts
/// without a header/body separator are skipped.
pub fn parse_parts<'a>(body: &'a [u8], boundary: &str) -> Vec<Part<'a>> {
    let delimiter = format!("--{}", boundary);
    let sep = b"\r\n\r\n";

    split_on(body, delimiter.as_bytes())
        .into_iter()
        .filter_map(|chunk| {
            let sep_pos = find_subsequence(chunk, sep)?;
            let headers = String::from_utf8_lossy(&chunk[..sep_pos]);
            let raw = &chunk[sep_pos + sep.len()..];
            Some(Part {
                name: disposition_param(&headers, "name"),
                filename: disposition_param(&headers, "filename"),
                data: raw.strip_suffix(b"\r\n").unwrap_or(raw),
            })
        })
        .collect()
}

/// The first file part, whatever its field name.
pub fn first_file<'a>(parts: &[Part<'a>]) -> Option<&'a [u8]> {
    parts.iter().find(|p| p.is_file()).map(|p| p.data)
}

/// A named text field, if present and valid UTF-8.
pub fn text_field(parts: &[Part<'_>], name: &str) -> Option<String> {
    parts
        .iter()
        .find(|p| !p.is_file() && p.name.as_deref() == Some(name))
        .and_then(|p| String::from_utf8(p.data.to_vec()).ok())
}
