pub mod response;

pub use response::{JsonResponse, NoData, RetCode};
