use std::fmt;

use crate::error::ParseError;

const DIRECTIVE: &str = "#shader";

/// Pipeline stage a section of the file belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "vertex" => Some(ShaderStage::Vertex),
            "fragment" => Some(ShaderStage::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Per-stage source text extracted from a sectioned file.
///
/// Every retained line is terminated by `\n`, including the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

/// Splits `src` into its vertex and fragment sections.
///
/// A section starts at a line whose first token is `#shader` followed by a
/// stage name and runs until the next directive or end of input. The
/// directive lines themselves are not part of any section. A stage may be
/// opened more than once; later sections append to earlier ones.
pub fn split_sections(src: &str) -> Result<ShaderSource, ParseError> {
    let mut out = ShaderSource::default();
    let mut current: Option<ShaderStage> = None;
    let mut seen = [false; 2];

    for (idx, line) in src.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.split_whitespace();

        if tokens.next() == Some(DIRECTIVE) {
            let stage = match tokens.next() {
                Some(tok) => ShaderStage::from_token(tok).ok_or_else(|| {
                    ParseError::new(format!("unknown shader stage `{tok}`"), line_no)
                })?,
                None => {
                    return Err(ParseError::new("`#shader` without a stage name", line_no));
                }
            };
            seen[stage as usize] = true;
            current = Some(stage);
            continue;
        }

        match current {
            Some(stage) => {
                let body = out.stage_mut(stage);
                body.push_str(line);
                body.push('\n');
            }
            None if line.trim().is_empty() => {}
            None => {
                return Err(ParseError::new(
                    "source text before the first `#shader` directive",
                    line_no,
                ));
            }
        }
    }

    for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
        if !seen[stage as usize] {
            return Err(ParseError::new(format!("no `#shader {stage}` section"), 0));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "#shader vertex\n\
                         line v1\n\
                         \tline v2\n\
                         #shader fragment\n\
                         line f1\n";

    #[test]
    fn splits_vertex_and_fragment() {
        let src = split_sections(BASIC).unwrap();
        assert_eq!(src.vertex, "line v1\n\tline v2\n");
        assert_eq!(src.fragment, "line f1\n");
    }

    #[test]
    fn stage_accessor_matches_fields() {
        let src = split_sections(BASIC).unwrap();
        assert_eq!(src.stage(ShaderStage::Vertex), src.vertex);
        assert_eq!(src.stage(ShaderStage::Fragment), src.fragment);
    }

    #[test]
    fn fragment_first_order_is_accepted() {
        let src = split_sections("#shader fragment\nf\n#shader vertex\nv\n").unwrap();
        assert_eq!(src.vertex, "v\n");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn blank_lines_inside_sections_are_kept() {
        let src = split_sections("#shader vertex\n\nv\n\n#shader fragment\nf").unwrap();
        assert_eq!(src.vertex, "\nv\n\n");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn leading_blank_lines_are_ignored() {
        let src = split_sections("\n   \n#shader vertex\nv\n#shader fragment\nf\n").unwrap();
        assert_eq!(src.vertex, "v\n");
    }

    #[test]
    fn directive_may_be_indented() {
        let src = split_sections("  #shader   vertex\nv\n\t#shader fragment\nf\n").unwrap();
        assert_eq!(src.vertex, "v\n");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn repeated_stage_appends() {
        let src =
            split_sections("#shader vertex\na\n#shader fragment\nf\n#shader vertex\nb\n").unwrap();
        assert_eq!(src.vertex, "a\nb\n");
    }

    #[test]
    fn crlf_line_endings() {
        let src = split_sections("#shader vertex\r\nv\r\n#shader fragment\r\nf\r\n").unwrap();
        assert_eq!(src.vertex, "v\n");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn err_unknown_stage() {
        let err = split_sections("#shader geometry\nx\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("geometry"));
    }

    #[test]
    fn err_directive_without_stage() {
        let err = split_sections("#shader vertex\nv\n#shader\n").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn err_text_before_first_directive() {
        let err = split_sections("// header\n#shader vertex\nv\n#shader fragment\nf\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn err_missing_fragment() {
        let err = split_sections("#shader vertex\nv\n").unwrap_err();
        assert_eq!(err.line, 0);
        assert!(err.to_string().contains("fragment"));
    }

    #[test]
    fn stage_display() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
