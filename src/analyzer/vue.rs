use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::analyzer::js;
use crate::analyzer::languages::{self, SourceLang};
use crate::error::ParseFailureReason;
use crate::file_id::FileId;
use crate::scanner::FileScanner;

fn script_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<script\b([^>]*)>(.*?)</script>").expect("invalid script block regex")
    })
}

fn template_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<template\b[^>]*>(.*?)</template>").expect("invalid template block regex")
    })
}

fn custom_element_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([A-Z][A-Za-z0-9_]*)\b").expect("invalid custom element regex"))
}

/// Lexically split a Vue Single-File Component into its script and template
/// blocks. Both the classic `<script>` and Composition API `<script setup>`
/// variants are recognized; `lang="ts"` selects the TypeScript grammar.
pub struct SfcBlocks {
    pub script: Option<(String, SourceLang)>,
    pub template: Option<String>,
}

pub fn split_sfc(source: &str) -> SfcBlocks {
    let script = script_block_re().captures(source).map(|caps| {
        let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let body = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
        let lang = if attrs.contains("lang=\"ts\"") || attrs.contains("lang='ts'") {
            SourceLang::TypeScript
        } else {
            SourceLang::JavaScript
        };
        (body, lang)
    });

    let template = template_block_re()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    SfcBlocks { script, template }
}

/// Analyze a `.vue` file: the script block runs through the ordinary JS/TS
/// procedure, then the template is lexically scanned for uppercase custom
/// elements and matched against the script's import bindings. No props are
/// extracted from the template per the component-usage contract for SFCs.
pub fn analyze_vue(
    source: &str,
    file_id: &FileId,
    scanner: &FileScanner,
    timeout: Option<Duration>,
) -> Result<js::JsExtraction, ParseFailureReason> {
    let blocks = split_sfc(source);

    let mut out = match blocks.script {
        Some((script_source, lang)) => {
            let language = languages::language_for(lang);
            match languages::parse(lang, &script_source, timeout) {
                Some(tree) => js::extract(&tree, &script_source, &language, file_id, scanner),
                None if timeout.is_some() => return Err(ParseFailureReason::Timeout),
                None => return Err(ParseFailureReason::SyntaxError("script block failed to parse".into())),
            }
        }
        None => js::JsExtraction::default(),
    };

    if let Some(template) = &blocks.template {
        scan_template_usages(template, &mut out);
    }

    Ok(out)
}

fn scan_template_usages(template: &str, out: &mut js::JsExtraction) {
    for caps in custom_element_re().captures_iter(template) {
        let name = &caps[1];
        if let Some(target) = out.local_imports.get(name).cloned() {
            let usage = out.component_usages.entry(target).or_default();
            usage.usage_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sfc_basic() {
        let source = "<template><Child/></template><script>import Child from './Child.vue'; export default {};</script>";
        let blocks = split_sfc(source);
        assert!(blocks.script.is_some());
        assert!(blocks.template.is_some());
        assert_eq!(blocks.script.unwrap().1, SourceLang::JavaScript);
    }

    #[test]
    fn test_split_sfc_typescript_lang() {
        let source = r#"<script lang="ts">export default {};</script>"#;
        let blocks = split_sfc(source);
        assert_eq!(blocks.script.unwrap().1, SourceLang::TypeScript);
    }

    #[test]
    fn test_custom_element_regex_matches_uppercase_only() {
        let template = "<div><Child/><span/><Widget foo=\"bar\"/></div>";
        let matches: Vec<&str> = custom_element_re()
            .captures_iter(template)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(matches, vec!["Child", "Widget"]);
    }
}
