use csv::ReaderBuilder;

/// Decodes raw sheet text into rows of fields.
///
/// Comma is the separator; a double quote opens a quoted field in which
/// commas and line breaks are literal and `""` is an escaped quote. CR, LF,
/// or CRLF terminate a row outside quotes. An unterminated quote runs to the
/// end of input instead of failing, blank lines and a trailing newline yield
/// no row, and rows may differ in field count.
pub fn decode(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    reader
        .records()
        .flatten()
        .map(|record| record.iter().map(|field| field.to_string()).collect())
        .collect()
}
