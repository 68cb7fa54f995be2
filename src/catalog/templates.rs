use serde::{Deserialize, Serialize};

/// Studio template. Identity is the image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub url: String,
    pub name: String,
}

impl Template {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

const DEFAULT_TEMPLATES: [(&str, &str); 12] = [
    ("https://i.imgflip.com/1ur9b0.jpg", "Distracted Boyfriend"),
    ("https://i.imgflip.com/30b1gx.jpg", "Drake Hotline Bling"),
    ("https://i.imgflip.com/4t0m5.jpg", "Doge"),
    ("https://i.imgflip.com/2kbn1e.jpg", "Surprised Pikachu"),
    ("https://i.imgflip.com/1otk96.jpg", "Mocking SpongeBob"),
    ("https://i.imgflip.com/3cimak.jpg", "Woman Yelling at Cat"),
    ("https://i.imgflip.com/3lmzyx.jpg", "UNO Draw 25"),
    ("https://i.imgflip.com/1yxkcp.jpg", "Expanding Brain"),
    ("https://i.imgflip.com/1bhk.jpg", "Success Kid"),
    ("https://i.imgflip.com/1o00in.jpg", "Is This a Pigeon?"),
    ("https://i.imgflip.com/3oevdk.jpg", "Bernie Once Again"),
    ("https://i.imgflip.com/39t1o.jpg", "Leonardo Cheers"),
];

pub fn default_templates() -> Vec<Template> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|(url, name)| Template::new(*url, *name))
        .collect()
}
