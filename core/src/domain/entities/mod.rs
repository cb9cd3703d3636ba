//! Domain entities representing core business objects.

pub mod area;
pub mod verification_code;

pub use area::{sub_area_key, Area, AreaSummary, SubAreaData, PROVINCE_LIST_KEY};
pub use verification_code::{
    image_code_key, send_flag_key, sms_code_key, CODE_LENGTH, IMAGE_CODE_ALPHABET,
    IMAGE_CODE_LENGTH, SEND_FLAG_MARKER,
};
