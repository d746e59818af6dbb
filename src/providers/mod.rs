pub mod dynv6;
