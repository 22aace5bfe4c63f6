use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaResponse {
    #[serde(rename = "type")]
    pub type_field: String,
    pub version: String,
    pub generated_timestamp: String,
    pub data: Vec<EtaEntry>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaEntry {
    pub co: String,
    pub route: String,
    /// "O" = outbound, "I" = inbound.
    pub dir: String,
    pub service_type: u32,
    pub seq: u32,
    pub dest_tc: String,
    pub dest_sc: String,
    pub dest_en: String,
    pub eta_seq: u32,
    /// RFC3339 arrival time; null when the upstream has no arrival to
    /// report for this row (the remark explains why).
    pub eta: Option<String>,
    pub rmk_tc: String,
    pub rmk_sc: String,
    pub rmk_en: String,
    pub data_timestamp: String,
}
