pub mod dsl;
pub mod eijiro_txt;
pub mod range_list;
pub mod utility;
