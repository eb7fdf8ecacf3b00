pub const NOT_AVAILABLE: &str = "N/A";

pub trait NonEmptyExt<'a> {
    fn non_empty(self) -> Option<&'a str>;
}

impl<'a> NonEmptyExt<'a> for Option<&'a str> {
    fn non_empty(self) -> Option<&'a str> {
        self.filter(|value| !value.is_empty())
    }
}

pub trait OrNotAvailableExt {
    /// The value, or "N/A" when it is missing or empty.
    fn or_na(self) -> String;
}

impl OrNotAvailableExt for Option<&str> {
    fn or_na(self) -> String {
        self.non_empty().unwrap_or(NOT_AVAILABLE).to_string()
    }
}

impl OrNotAvailableExt for &str {
    fn or_na(self) -> String {
        Some(self).or_na()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_na() {
        assert_eq!(Some("h1").or_na(), "h1");
        assert_eq!(Some("").or_na(), "N/A");
        assert_eq!(None::<&str>.or_na(), "N/A");
        assert_eq!("".or_na(), "N/A");
        assert_eq!("1.00 KB".or_na(), "1.00 KB");
    }
}
