pub mod registry;
pub mod schema;
pub mod scrape;
pub mod search;

pub use registry::{Tool, ToolRegistry};
pub use schema::tool_call_schema_json;
pub use scrape::ScrapeTool;
pub use search::WebSearchTool;
