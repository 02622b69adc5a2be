pub mod c;
pub mod css;
pub mod html;
pub mod java;
pub mod javascript;
pub mod php;
pub mod python;
pub mod typescript;

pub use c::CAnalyzer;
pub use css::CssAnalyzer;
pub use html::HtmlAnalyzer;
pub use java::JavaAnalyzer;
pub use javascript::JavaScriptAnalyzer;
pub use php::PhpAnalyzer;
pub use python::PythonAnalyzer;
pub use typescript::TypeScriptAnalyzer;

use indexmap::IndexSet;
use regex::Regex;

/// Distinct values in first-seen order
pub(crate) fn unique<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// First capture group of every match
pub(crate) fn captures<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}
