//! Wire records exchanged with the metric manager service.
//!
//! Field tags are part of the protocol; never renumber them.

use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Time {
    #[prost(int64, tag = "1")]
    pub sec: i64,
    #[prost(int64, tag = "2")]
    pub nsec: i64,
}

/// Typed configuration maps; one map per value tag.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConfigMap {
    #[prost(map = "string, int64", tag = "1")]
    pub int_map: HashMap<String, i64>,
    #[prost(map = "string, string", tag = "2")]
    pub string_map: HashMap<String, String>,
    #[prost(map = "string, double", tag = "3")]
    pub float_map: HashMap<String, f64>,
    #[prost(map = "string, bool", tag = "4")]
    pub bool_map: HashMap<String, bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapError {
    #[prost(string, tag = "1")]
    pub error_message: String,
    #[prost(map = "string, string", tag = "2")]
    pub error_fields: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArrString {
    #[prost(string, repeated, tag = "1")]
    pub s: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metric {
    #[prost(string, repeated, tag = "1")]
    pub namespace: Vec<String>,
    #[prost(int64, tag = "2")]
    pub version: i64,
    #[prost(message, optional, tag = "3")]
    pub config: Option<ConfigMap>,
    #[prost(message, optional, tag = "4")]
    pub last_advertised_time: Option<Time>,
    #[prost(map = "string, string", tag = "5")]
    pub tags: HashMap<String, String>,
    #[prost(message, optional, tag = "6")]
    pub timestamp: Option<Time>,
    #[prost(string, tag = "7")]
    pub unit: String,
    #[prost(string, tag = "8")]
    pub description: String,
    #[prost(oneof = "metric::Data", tags = "9, 10, 11, 12, 13, 14, 15, 16, 17")]
    pub data: Option<metric::Data>,
}

pub mod metric {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(float, tag = "9")]
        Float32Data(f32),
        #[prost(double, tag = "10")]
        Float64Data(f64),
        #[prost(int32, tag = "11")]
        Int32Data(i32),
        #[prost(int64, tag = "12")]
        Int64Data(i64),
        #[prost(bytes = "vec", tag = "13")]
        BytesData(Vec<u8>),
        #[prost(string, tag = "14")]
        StringData(String),
        #[prost(uint32, tag = "15")]
        Uint32Data(u32),
        #[prost(uint64, tag = "16")]
        Uint64Data(u64),
        #[prost(bool, tag = "17")]
        BoolData(bool),
    }
}

/// Core plugin descriptor, used when subscribing and unsubscribing.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Plugin {
    #[prost(string, tag = "1")]
    pub type_name: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub version: i64,
    #[prost(int32, tag = "4")]
    pub plugin_type: i32,
}

/// Plugin descriptor as referenced by a workflow, used when validating deps.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribedPlugin {
    #[prost(string, tag = "1")]
    pub type_name: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub version: i64,
    #[prost(message, optional, tag = "4")]
    pub config: Option<ConfigMap>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExpandWildcardsRequest {
    #[prost(string, repeated, tag = "1")]
    pub namespace: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExpandWildcardsReply {
    #[prost(message, repeated, tag = "1")]
    pub nss: Vec<ArrString>,
    #[prost(message, optional, tag = "2")]
    pub error: Option<SnapError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubProcMetricsRequest {
    #[prost(string, tag = "1")]
    pub content_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub content: Vec<u8>,
    #[prost(string, tag = "3")]
    pub plugin_name: String,
    #[prost(int64, tag = "4")]
    pub plugin_version: i64,
    #[prost(message, optional, tag = "5")]
    pub config: Option<ConfigMap>,
    #[prost(string, tag = "6")]
    pub task_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorReply {
    #[prost(string, repeated, tag = "1")]
    pub errors: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessMetricsReply {
    #[prost(string, tag = "1")]
    pub content_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub content: Vec<u8>,
    #[prost(string, repeated, tag = "3")]
    pub errors: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CollectMetricsRequest {
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<Metric>,
    #[prost(message, optional, tag = "2")]
    pub deadline: Option<Time>,
    #[prost(string, tag = "3")]
    pub task_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CollectMetricsReply {
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<Metric>,
    #[prost(string, repeated, tag = "2")]
    pub errors: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPluginContentTypesRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(int32, tag = "2")]
    pub plugin_type: i32,
    #[prost(int32, tag = "3")]
    pub version: i32,
}

/// `error` is a plain string; empty means no error.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPluginContentTypesReply {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, repeated, tag = "2")]
    pub accepted_types: Vec<String>,
    #[prost(string, repeated, tag = "3")]
    pub returned_types: Vec<String>,
    #[prost(string, tag = "4")]
    pub error: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidateDepsRequest {
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<Metric>,
    #[prost(message, repeated, tag = "2")]
    pub plugins: Vec<SubscribedPlugin>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidateDepsReply {
    #[prost(message, repeated, tag = "1")]
    pub errors: Vec<SnapError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribeDepsRequest {
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<Metric>,
    #[prost(message, repeated, tag = "2")]
    pub plugins: Vec<Plugin>,
    #[prost(string, tag = "3")]
    pub task_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribeDepsReply {
    #[prost(message, repeated, tag = "1")]
    pub errors: Vec<SnapError>,
}
