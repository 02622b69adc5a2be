use chrono::{DateTime, Utc};

use crate::resume::Resume;

/// Turns a résumé into a document
pub trait ResumeRenderer {
    fn render(&self, resume: &Resume) -> String;
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Plain text: a title line per project followed by indented bullets
pub struct TextResumeRenderer;

impl ResumeRenderer for TextResumeRenderer {
    fn render(&self, resume: &Resume) -> String {
        let mut out = String::new();
        for item in &resume.items {
            out.push_str(&format!(
                "{} : {} - {}\n",
                item.title,
                format_date(item.start_date),
                format_date(item.end_date)
            ));
            for bullet in &item.bullet_points {
                out.push_str(&format!("   - {bullet}\n"));
            }
            out.push('\n');
        }
        out
    }
}

/// Escapes LaTeX special characters in user text
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str(r"\&"),
            '%' => escaped.push_str(r"\%"),
            '$' => escaped.push_str(r"\$"),
            '#' => escaped.push_str(r"\#"),
            '_' => escaped.push_str(r"\_"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Standalone `article` document with Experience and Skills sections
pub struct LatexResumeRenderer;

impl ResumeRenderer for LatexResumeRenderer {
    fn render(&self, resume: &Resume) -> String {
        let mut tex = vec![
            r"\documentclass{article}".to_string(),
            r"\usepackage[margin=1in]{geometry}".to_string(),
            r"\begin{document}".to_string(),
        ];

        if let Some(email) = &resume.email {
            tex.push(format!(r"\noindent {}\\", escape_latex(email)));
        }

        tex.push(r"\section*{Experience}".to_string());
        for item in &resume.items {
            tex.push(format!(r"\subsection*{{{}}}", escape_latex(&item.title)));
            tex.push(format!(
                r"\textit{{{} -- {}}}\\",
                format_date(item.start_date),
                format_date(item.end_date)
            ));
            tex.push(r"\begin{itemize}".to_string());
            for bullet in &item.bullet_points {
                tex.push(format!(r"\item {}", escape_latex(bullet)));
            }
            tex.push(r"\end{itemize}".to_string());

            if !item.frameworks.is_empty() {
                let names: Vec<String> = item
                    .frameworks
                    .iter()
                    .map(|f| escape_latex(&f.skill_name))
                    .collect();
                tex.push(format!(r"\textbf{{Frameworks:}} {}", names.join(", ")));
            }
        }

        if !resume.skills.is_empty() {
            tex.push(r"\section*{Skills}".to_string());
            let skills: Vec<String> = resume.skills.iter().map(|s| escape_latex(s)).collect();
            tex.push(skills.join(", "));
        }

        tex.push(r"\end{document}".to_string());
        tex.join("\n")
    }
}
