//! Request and response payloads

pub mod areas;
pub mod verification;

pub use areas::{AreaQuery, ProvinceListData, SubAreaResponseData};
pub use verification::{SendCodeData, SmsCodeQuery};
