pub type Endpoint = str;

pub const PLANT_LIST: &Endpoint = "/op/v0/plant/list";
pub const PLANT_DETAIL: &Endpoint = "/op/v0/plant/detail";
pub const DEVICE_LIST: &Endpoint = "/op/v0/device/list";
pub const DEVICE_DETAIL: &Endpoint = "/op/v0/device/detail";
pub const DEVICE_REAL_QUERY: &Endpoint = "/op/v0/device/real/query";
pub const DEVICE_HISTORY_QUERY: &Endpoint = "/op/v0/device/history/query";
pub const DEVICE_REPORT_QUERY: &Endpoint = "/op/v0/device/report/query";
