use crate::api::scalar::{data_timestamp, query_timestamp, quoted_f64, quoted_f64_seq};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

type KW = f64;

/// Name of a telemetry channel, e.g. `pvPower`.
///
/// The server knows far more channels than the constants below; any name round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(Cow<'static, str>);

impl Variable {
    pub const PV_POWER: Variable = Variable(Cow::Borrowed("pvPower"));
    pub const PV1_VOLT: Variable = Variable(Cow::Borrowed("pv1Volt"));
    pub const PV1_CURRENT: Variable = Variable(Cow::Borrowed("pv1Current"));
    pub const PV1_POWER: Variable = Variable(Cow::Borrowed("pv1Power"));
    pub const PV2_VOLT: Variable = Variable(Cow::Borrowed("pv2Volt"));
    pub const PV2_CURRENT: Variable = Variable(Cow::Borrowed("pv2Current"));
    pub const PV2_POWER: Variable = Variable(Cow::Borrowed("pv2Power"));
    pub const GENERATION_POWER: Variable = Variable(Cow::Borrowed("generationPower"));
    pub const FEEDIN_POWER: Variable = Variable(Cow::Borrowed("feedinPower"));
    pub const GRID_CONSUMPTION_POWER: Variable = Variable(Cow::Borrowed("gridConsumptionPower"));
    pub const LOADS_POWER: Variable = Variable(Cow::Borrowed("loadsPower"));
    pub const BAT_CHARGE_POWER: Variable = Variable(Cow::Borrowed("batChargePower"));
    pub const BAT_DISCHARGE_POWER: Variable = Variable(Cow::Borrowed("batDischargePower"));
    pub const SOC: Variable = Variable(Cow::Borrowed("SoC"));
    pub const AMBIENT_TEMPERATURE: Variable = Variable(Cow::Borrowed("ambientTemperation"));
    pub const INVERTER_TEMPERATURE: Variable = Variable(Cow::Borrowed("invTemperation"));
    pub const BATTERY_TEMPERATURE: Variable = Variable(Cow::Borrowed("batTemperature"));

    /* production report channels */
    pub const GENERATION: Variable = Variable(Cow::Borrowed("generation"));
    pub const FEEDIN: Variable = Variable(Cow::Borrowed("feedin"));
    pub const GRID_CONSUMPTION: Variable = Variable(Cow::Borrowed("gridConsumption"));
    pub const CHARGE_ENERGY_TOTAL: Variable = Variable(Cow::Borrowed("chargeEnergyToTal"));
    pub const DISCHARGE_ENERGY_TOTAL: Variable = Variable(Cow::Borrowed("dischargeEnergyToTal"));

    pub fn new(name: impl Into<String>) -> Self {
        Variable(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page selection embedded in list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetPowerStationListOptions {
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct GetPowerStationOptions {
    pub station_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetInverterListOptions {
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct GetInverterOptions {
    pub inverter_sn: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetInverterRealtimeDataOptions {
    #[serde(rename = "sn")]
    pub inverter_sn: String,
    pub variables: Vec<Variable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetInverterHistoryDataOptions {
    #[serde(rename = "sn")]
    pub inverter_sn: String,
    pub variables: Vec<Variable>,
    #[serde(with = "query_timestamp", skip_serializing_if = "Option::is_none")]
    pub begin: Option<DateTime<Utc>>,
    #[serde(with = "query_timestamp", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportDimension {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetInverterProductionReportOptions {
    #[serde(rename = "sn")]
    pub inverter_sn: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub dimension: ReportDimension,
    pub variables: Vec<Variable>,
}

/// Device status; codes the client does not know keep their raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InverterStatus {
    Online,
    Fault,
    Offline,
    Unknown(i64),
}

impl InverterStatus {
    pub fn code(&self) -> i64 {
        match self {
            InverterStatus::Online => 1,
            InverterStatus::Fault => 2,
            InverterStatus::Offline => 3,
            InverterStatus::Unknown(code) => *code,
        }
    }
}

impl From<i64> for InverterStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => InverterStatus::Online,
            2 => InverterStatus::Fault,
            3 => InverterStatus::Offline,
            code => InverterStatus::Unknown(code),
        }
    }
}

impl Default for InverterStatus {
    fn default() -> Self {
        InverterStatus::Unknown(0)
    }
}

impl<'de> Deserialize<'de> for InverterStatus {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;

        Value::as_i64(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid status: {}", value)))
            .map(InverterStatus::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PowerStation {
    pub name: String,
    #[serde(rename = "ianaTimezone")]
    pub iana_timezone: String,
    #[serde(rename = "stationID")]
    pub station_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Module {
    #[serde(rename = "moduleSN")]
    pub module_sn: String,
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerStationDetail {
    pub country: String,
    pub address: String,
    pub installer: Contact,
    pub city: String,
    pub timezone: String,
    pub postcode: String,
    pub station_name: String,
    pub user: Contact,
    pub modules: Vec<Module>,
    pub capacity: KW,
    #[serde(deserialize_with = "data_timestamp::deserialize")]
    pub create_date: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inverter {
    pub device_type: String,
    pub has_battery: bool,
    #[serde(rename = "hasPV")]
    pub has_pv: bool,
    pub station_name: String,
    #[serde(rename = "moduleSN")]
    pub module_sn: String,
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
    pub product_type: String,
    #[serde(rename = "stationID")]
    pub station_id: String,
    pub status: InverterStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InverterFunction {
    pub scheduler: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InverterDetail {
    pub device_type: String,
    pub master_version: String,
    pub afci_version: String,
    #[serde(rename = "hasPV")]
    pub has_pv: bool,
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
    pub slave_version: String,
    pub has_battery: bool,
    pub function: InverterFunction,
    pub hardware_version: String,
    pub manager_version: String,
    pub station_name: String,
    #[serde(rename = "moduleSN")]
    pub module_sn: String,
    pub product_type: String,
    #[serde(rename = "stationID")]
    pub station_id: String,
    pub status: InverterStatus,
}

/// One channel of a realtime snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RealTimeValue {
    pub unit: String,
    pub name: String,
    pub variable: Variable,
    #[serde(deserialize_with = "quoted_f64::deserialize")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InverterRealTimeData {
    pub datas: Vec<RealTimeValue>,
    #[serde(deserialize_with = "data_timestamp::deserialize")]
    pub time: Option<DateTime<FixedOffset>>,
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "data_timestamp::deserialize")]
    pub time: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "quoted_f64::deserialize")]
    pub value: f64,
}

/// Time series of one channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistorySeries {
    pub unit: String,
    pub name: String,
    pub variable: Variable,
    pub data: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InverterHistoryTimeData {
    pub datas: Vec<HistorySeries>,
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
}

/// Per-period totals of one channel; `values` has one entry per month, day or hour
/// depending on the requested dimension.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductionReport {
    pub unit: String,
    #[serde(deserialize_with = "quoted_f64_seq::deserialize")]
    pub values: Vec<f64>,
    pub variable: Variable,
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn list_options_flatten_pagination() {
        let options = GetInverterListOptions {
            pagination: Pagination {
                current_page: 2,
                page_size: 50,
            },
        };
        assert_eq!(
            json!({"currentPage": 2, "pageSize": 50}),
            serde_json::to_value(&options).unwrap()
        );
        assert_eq!(
            json!({"currentPage": 1, "pageSize": 10}),
            serde_json::to_value(GetPowerStationListOptions::default()).unwrap()
        );
    }

    #[test]
    fn history_options_omit_missing_range() {
        let mut options = GetInverterHistoryDataOptions {
            inverter_sn: "SN1".to_string(),
            variables: vec![Variable::PV_POWER, Variable::new("meterPower")],
            begin: None,
            end: None,
        };
        assert_eq!(
            json!({"sn": "SN1", "variables": ["pvPower", "meterPower"]}),
            serde_json::to_value(&options).unwrap()
        );

        options.begin = Some(Utc.timestamp_millis_opt(1_709_280_000_000).unwrap());
        options.end = Some(Utc.timestamp_millis_opt(1_709_366_400_000).unwrap());
        assert_eq!(
            json!({
                "sn": "SN1",
                "variables": ["pvPower", "meterPower"],
                "begin": 1_709_280_000_000_i64,
                "end": 1_709_366_400_000_i64,
            }),
            serde_json::to_value(&options).unwrap()
        );
    }

    #[test]
    fn report_options() {
        let options = GetInverterProductionReportOptions {
            inverter_sn: "SN1".to_string(),
            year: 2024,
            month: Some(3),
            day: None,
            dimension: ReportDimension::Month,
            variables: vec![Variable::GENERATION],
        };
        assert_eq!(
            json!({
                "sn": "SN1",
                "year": 2024,
                "month": 3,
                "dimension": "month",
                "variables": ["generation"],
            }),
            serde_json::to_value(&options).unwrap()
        );
    }

    #[test]
    fn inverter_status() {
        let status: InverterStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(InverterStatus::Offline, status);
        assert_eq!(3, status.code());

        let status: InverterStatus = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(InverterStatus::Unknown(4), status);
        assert_eq!(4, status.code());

        let status: InverterStatus = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(InverterStatus::Unknown(0), status);
        assert_ne!(InverterStatus::Unknown(4), status);

        let inverter: Inverter = serde_json::from_value(json!({"status": 42})).unwrap();
        assert_eq!(InverterStatus::Unknown(42), inverter.status);
        let inverter: Inverter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(InverterStatus::Unknown(0), inverter.status);
        assert!(serde_json::from_value::<InverterStatus>(json!("online")).is_err());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_value::<Inverter>(json!({"hasBattery": "yes"})).is_err());
        assert!(serde_json::from_value::<PowerStation>(json!({"name": 5})).is_err());
    }

    #[test]
    fn variable_accepts_unknown_names() {
        let variable: Variable = serde_json::from_value(json!("meterPower2")).unwrap();
        assert_eq!("meterPower2", variable.as_str());
        assert_eq!(Variable::new("pvPower"), Variable::PV_POWER);
    }
}
