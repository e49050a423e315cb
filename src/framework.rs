/// The component framework a project is analyzed as.
///
/// Determines which source extensions [`crate::scanner::scan_files`] discovers
/// and which extension-probing order [`crate::scanner::resolve_import`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    /// Extensions `scan_files` discovers for this framework, in probing order.
    pub fn source_extensions(self) -> &'static [&'static str] {
        match self {
            Framework::React => &["js", "jsx", "ts", "tsx"],
            Framework::Vue => &["vue", "js", "ts"],
        }
    }

    /// Parse a loose CLI string (`"react"`, `"vue"`) into a `Framework`.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "react" => Some(Framework::React),
            "vue" => Some(Framework::Vue),
            _ => None,
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framework::React => write!(f, "react"),
            Framework::Vue => write!(f, "vue"),
        }
    }
}
