//! Display names for the provider's language codes

/// English name of an ISO 639-1 code as used by the provider
///
/// Matching ignores case. Regional variants such as `pt-br` have their own
/// names.
pub fn language_name(code: &str) -> Option<&'static str> {
    let name = match code.trim().to_ascii_lowercase().as_str() {
        "ar" => "Arabic",
        "bg" => "Bulgarian",
        "bs" => "Bosnian",
        "ca" => "Catalan",
        "cs" => "Czech",
        "da" => "Danish",
        "de" => "German",
        "el" => "Greek",
        "en" => "English",
        "es" => "Spanish",
        "ea" => "Spanish (LA)",
        "et" => "Estonian",
        "eu" => "Basque",
        "fa" => "Persian",
        "fi" => "Finnish",
        "fr" => "French",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "hr" => "Croatian",
        "hu" => "Hungarian",
        "id" => "Indonesian",
        "is" => "Icelandic",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "lt" => "Lithuanian",
        "lv" => "Latvian",
        "mk" => "Macedonian",
        "ms" => "Malay",
        "nl" => "Dutch",
        "no" => "Norwegian",
        "pl" => "Polish",
        "pt" | "pt-pt" => "Portuguese",
        "pt-br" | "pb" => "Portuguese (BR)",
        "ro" => "Romanian",
        "ru" => "Russian",
        "sk" => "Slovak",
        "sl" => "Slovenian",
        "sq" => "Albanian",
        "sr" => "Serbian",
        "sv" => "Swedish",
        "th" => "Thai",
        "tr" => "Turkish",
        "uk" => "Ukrainian",
        "vi" => "Vietnamese",
        "zh-cn" | "zh" => "Chinese (simplified)",
        "zh-tw" => "Chinese (traditional)",
        _ => return None,
    };
    Some(name)
}

/// Name to show for `code`, falling back to the code itself
pub fn display_name(code: &str) -> String {
    language_name(code).map_or_else(|| code.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(language_name("en"), Some("English"));
        assert_eq!(language_name("DE"), Some("German"));
        assert_eq!(language_name("pt-BR"), Some("Portuguese (BR)"));
        assert_eq!(language_name("zh-tw"), Some("Chinese (traditional)"));
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(language_name("xx"), None);
        assert_eq!(display_name("xx"), "xx");
        assert_eq!(display_name("fr"), "French");
    }
}
