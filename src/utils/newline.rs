use serde::Serialize;

/// Line terminator style of a decoded file, taken from its first line break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl Newline {
    pub fn detect(text: &str) -> Newline {
        let Some(index) = text.find(['\r', '\n']) else {
            return Newline::default();
        };

        match &text[index..] {
            rest if rest.starts_with("\r\n") => Newline::CrLf,
            rest if rest.starts_with('\r') => Newline::Cr,
            _ => Newline::Lf,
        }
    }
}
