//! AI Tools Service

use serde::{Deserialize, Serialize};

/// Advertised size of the full catalogue
pub const TOTAL_TOOL_COUNT: usize = 120;

const CATEGORIES: [&str; 10] = [
    "Writing",
    "Design",
    "Development",
    "Marketing",
    "Analytics",
    "Customer Service",
    "Project Management",
    "Sales",
    "HR",
    "Finance",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTool {
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: String,
}

/// Featured tools plus the catalogue size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiToolsResult {
    pub tools: Vec<AiTool>,
    pub total_count: usize,
}

pub struct AiToolsService;

impl AiToolsService {
    pub fn tools() -> AiToolsResult {
        let tools = [
            ("ChatGPT", "Writing", "AI writing assistant", "https://chat.openai.com"),
            ("Midjourney", "Design", "AI image generation", "https://midjourney.com"),
            ("Notion AI", "Productivity", "AI-powered workspace", "https://notion.so"),
            ("GitHub Copilot", "Development", "AI code assistant", "https://github.com/copilot"),
            ("Jasper", "Marketing", "AI content creation", "https://jasper.ai"),
        ]
        .into_iter()
        .map(|(name, category, description, url)| AiTool {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        })
        .collect();

        AiToolsResult {
            tools,
            total_count: TOTAL_TOOL_COUNT,
        }
    }

    pub fn categories() -> &'static [&'static str] {
        &CATEGORIES
    }
}
