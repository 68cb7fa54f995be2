use crate::catalog::Template;

/// What the studio preview frame shows.
///
/// `Overlay` is a local approximation only; the server-rendered result is
/// authoritative once one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewComposition<'a> {
    Rendered {
        url: &'a str,
    },
    Overlay {
        template: &'a Template,
        top: Option<String>,
        bottom: Option<String>,
    },
    Empty,
}

impl<'a> PreviewComposition<'a> {
    pub(super) fn compose(
        rendered_url: Option<&'a str>,
        template: Option<&'a Template>,
        top_text: &str,
        bottom_text: &str,
    ) -> Self {
        if let Some(url) = rendered_url {
            return Self::Rendered { url };
        }
        match template {
            Some(template) => Self::Overlay {
                template,
                top: overlay_line(top_text),
                bottom: overlay_line(bottom_text),
            },
            None => Self::Empty,
        }
    }
}

fn overlay_line(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_uppercases_and_omits_empty_lines() {
        let template = Template::new("https://i.imgflip.com/4t0m5.jpg", "Doge");
        let preview = PreviewComposition::compose(None, Some(&template), "such wow", "");
        assert_eq!(
            preview,
            PreviewComposition::Overlay {
                template: &template,
                top: Some("SUCH WOW".to_string()),
                bottom: None,
            }
        );
    }

    #[test]
    fn rendered_result_takes_precedence_over_overlay() {
        let template = Template::new("https://i.imgflip.com/4t0m5.jpg", "Doge");
        let preview =
            PreviewComposition::compose(Some("blob:memedrop/1"), Some(&template), "top", "bottom");
        assert_eq!(
            preview,
            PreviewComposition::Rendered {
                url: "blob:memedrop/1"
            }
        );
    }

    #[test]
    fn no_template_and_no_result_is_empty() {
        assert_eq!(
            PreviewComposition::compose(None, None, "ignored", "ignored"),
            PreviewComposition::Empty
        );
    }
}
