pub mod text;

pub use text::{
    AnalyzeRequest, AnalyzeResponse, GenerateTextRequest, GenerateTextResponse, SUCCESS_STATUS,
};
