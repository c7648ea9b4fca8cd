//! Core LLRP schema: the data tables the codec dispatches through.
//!
//! This is deliberately pure data. No kind gets hand-written decode or
//! encode logic; everything flows through the generic codec driven by
//! these descriptors. Type numbers are the standard LLRP assignments.

use crate::types::{
    ChildDescriptor, EnumDescriptor, FieldDescriptor, FieldType, Multiplicity, TypeDescriptor,
};

/// Message type numbers.
pub mod msg {
    pub const GET_READER_CAPABILITIES: u16 = 1;
    pub const GET_READER_CONFIG: u16 = 2;
    pub const SET_READER_CONFIG: u16 = 3;
    pub const CLOSE_CONNECTION_RESPONSE: u16 = 4;
    pub const GET_READER_CAPABILITIES_RESPONSE: u16 = 11;
    pub const GET_READER_CONFIG_RESPONSE: u16 = 12;
    pub const SET_READER_CONFIG_RESPONSE: u16 = 13;
    pub const CLOSE_CONNECTION: u16 = 14;
    pub const ADD_ROSPEC: u16 = 20;
    pub const DELETE_ROSPEC: u16 = 21;
    pub const START_ROSPEC: u16 = 22;
    pub const STOP_ROSPEC: u16 = 23;
    pub const ENABLE_ROSPEC: u16 = 24;
    pub const DISABLE_ROSPEC: u16 = 25;
    pub const GET_ROSPECS: u16 = 26;
    pub const ADD_ROSPEC_RESPONSE: u16 = 30;
    pub const DELETE_ROSPEC_RESPONSE: u16 = 31;
    pub const START_ROSPEC_RESPONSE: u16 = 32;
    pub const STOP_ROSPEC_RESPONSE: u16 = 33;
    pub const ENABLE_ROSPEC_RESPONSE: u16 = 34;
    pub const DISABLE_ROSPEC_RESPONSE: u16 = 35;
    pub const GET_ROSPECS_RESPONSE: u16 = 36;
    pub const RO_ACCESS_REPORT: u16 = 61;
    pub const KEEPALIVE: u16 = 62;
    pub const READER_EVENT_NOTIFICATION: u16 = 63;
    pub const KEEPALIVE_ACK: u16 = 72;
    pub const ERROR_MESSAGE: u16 = 100;
}

/// Parameter type numbers.
pub mod param {
    pub const ANTENNA_ID: u16 = 1;
    pub const FIRST_SEEN_TIMESTAMP_UTC: u16 = 2;
    pub const PEAK_RSSI: u16 = 6;
    pub const TAG_SEEN_COUNT: u16 = 8;
    pub const RO_SPEC_ID: u16 = 9;
    pub const EPC_96: u16 = 13;
    pub const UTC_TIMESTAMP: u16 = 128;
    pub const RO_SPEC: u16 = 177;
    pub const RO_BOUNDARY_SPEC: u16 = 178;
    pub const RO_SPEC_START_TRIGGER: u16 = 179;
    pub const RO_SPEC_STOP_TRIGGER: u16 = 182;
    pub const AI_SPEC: u16 = 183;
    pub const AI_SPEC_STOP_TRIGGER: u16 = 184;
    pub const INVENTORY_PARAMETER_SPEC: u16 = 186;
    pub const RO_REPORT_SPEC: u16 = 237;
    pub const TAG_REPORT_CONTENT_SELECTOR: u16 = 238;
    pub const TAG_REPORT_DATA: u16 = 240;
    pub const EPC_DATA: u16 = 241;
    pub const READER_EVENT_NOTIFICATION_DATA: u16 = 246;
    pub const READER_EXCEPTION_EVENT: u16 = 252;
    pub const ANTENNA_EVENT: u16 = 255;
    pub const CONNECTION_ATTEMPT_EVENT: u16 = 256;
    pub const LLRP_STATUS: u16 = 287;
    pub const FIELD_ERROR: u16 = 288;
    pub const PARAMETER_ERROR: u16 = 289;
}

// Enumeration tables.

pub static STATUS_CODE: EnumDescriptor = EnumDescriptor {
    name: "StatusCode",
    entries: &[
        (0, "M_Success"),
        (100, "M_ParameterError"),
        (101, "M_FieldError"),
        (102, "M_UnexpectedParameter"),
        (103, "M_MissingParameter"),
        (200, "A_Invalid"),
        (201, "A_OutOfRange"),
        (300, "P_ParameterError"),
        (301, "P_FieldError"),
        (302, "P_UnexpectedParameter"),
        (303, "P_MissingParameter"),
        (401, "R_DeviceError"),
    ],
};

pub static CONNECTION_ATTEMPT_STATUS: EnumDescriptor = EnumDescriptor {
    name: "ConnectionAttemptStatus",
    entries: &[
        (0, "Success"),
        (1, "Failed_A_Reader_Initiated_Connection_Already_Exists"),
        (2, "Failed_A_Client_Initiated_Connection_Already_Exists"),
        (3, "Failed_Reason_Other_Than_A_Connection_Already_Exists"),
        (4, "Another_Connection_Attempted"),
    ],
};

pub static RO_SPEC_STATE: EnumDescriptor = EnumDescriptor {
    name: "ROSpecState",
    entries: &[(0, "Disabled"), (1, "Inactive"), (2, "Active")],
};

pub static RO_SPEC_START_TRIGGER_TYPE: EnumDescriptor = EnumDescriptor {
    name: "ROSpecStartTriggerType",
    entries: &[(0, "Null"), (1, "Immediate"), (2, "Periodic"), (3, "GPI")],
};

pub static RO_SPEC_STOP_TRIGGER_TYPE: EnumDescriptor = EnumDescriptor {
    name: "ROSpecStopTriggerType",
    entries: &[(0, "Null"), (1, "Duration"), (2, "GPI_With_Timeout")],
};

pub static AI_SPEC_STOP_TRIGGER_TYPE: EnumDescriptor = EnumDescriptor {
    name: "AISpecStopTriggerType",
    entries: &[
        (0, "Null"),
        (1, "Duration"),
        (2, "GPI_With_Timeout"),
        (3, "Tag_Observation"),
    ],
};

pub static AIR_PROTOCOL: EnumDescriptor = EnumDescriptor {
    name: "AirProtocols",
    entries: &[(0, "Unspecified"), (1, "EPCGlobalClass1Gen2")],
};

pub static RO_REPORT_TRIGGER_TYPE: EnumDescriptor = EnumDescriptor {
    name: "ROReportTriggerType",
    entries: &[
        (0, "None"),
        (1, "Upon_N_Tags_Or_End_Of_AISpec"),
        (2, "Upon_N_Tags_Or_End_Of_ROSpec"),
    ],
};

pub static ANTENNA_EVENT_TYPE: EnumDescriptor = EnumDescriptor {
    name: "AntennaEventType",
    entries: &[(0, "Antenna_Disconnected"), (1, "Antenna_Connected")],
};

pub static CAPABILITIES_REQUESTED_DATA: EnumDescriptor = EnumDescriptor {
    name: "GetReaderCapabilitiesRequestedData",
    entries: &[
        (0, "All"),
        (1, "General_Device_Capabilities"),
        (2, "LLRP_Capabilities"),
        (3, "Regulatory_Capabilities"),
        (4, "Air_Protocol_LLRP_Capabilities"),
    ],
};

pub static CONFIG_REQUESTED_DATA: EnumDescriptor = EnumDescriptor {
    name: "GetReaderConfigRequestedData",
    entries: &[
        (0, "All"),
        (1, "Identification"),
        (2, "AntennaProperties"),
        (3, "AntennaConfiguration"),
    ],
};

// Declaration shorthand. These keep the tables below readable; the result
// is still plain const data.

const fn message(
    type_num: u16,
    name: &'static str,
    fields: &'static [FieldDescriptor],
    children: &'static [ChildDescriptor],
    response_type: Option<u16>,
) -> TypeDescriptor {
    TypeDescriptor {
        type_num,
        is_message: true,
        name,
        fields,
        children,
        response_type,
    }
}

const fn parameter(
    type_num: u16,
    name: &'static str,
    fields: &'static [FieldDescriptor],
    children: &'static [ChildDescriptor],
) -> TypeDescriptor {
    TypeDescriptor {
        type_num,
        is_message: false,
        name,
        fields,
        children,
        response_type: None,
    }
}

const fn field(name: &'static str, ty: FieldType) -> FieldDescriptor {
    FieldDescriptor { name, ty }
}

const fn one(param_type: u16, name: &'static str) -> ChildDescriptor {
    ChildDescriptor {
        param_type,
        name,
        multiplicity: Multiplicity::One,
    }
}

const fn opt(param_type: u16, name: &'static str) -> ChildDescriptor {
    ChildDescriptor {
        param_type,
        name,
        multiplicity: Multiplicity::ZeroOrOne,
    }
}

const fn many(param_type: u16, name: &'static str) -> ChildDescriptor {
    ChildDescriptor {
        param_type,
        name,
        multiplicity: Multiplicity::ZeroOrMore,
    }
}

const fn some(param_type: u16, name: &'static str) -> ChildDescriptor {
    ChildDescriptor {
        param_type,
        name,
        multiplicity: Multiplicity::OneOrMore,
    }
}

// Messages.

pub static GET_READER_CAPABILITIES: TypeDescriptor = message(
    msg::GET_READER_CAPABILITIES,
    "GET_READER_CAPABILITIES",
    &[field(
        "RequestedData",
        FieldType::EnumU8(&CAPABILITIES_REQUESTED_DATA),
    )],
    &[],
    Some(msg::GET_READER_CAPABILITIES_RESPONSE),
);

pub static GET_READER_CAPABILITIES_RESPONSE: TypeDescriptor = message(
    msg::GET_READER_CAPABILITIES_RESPONSE,
    "GET_READER_CAPABILITIES_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static GET_READER_CONFIG: TypeDescriptor = message(
    msg::GET_READER_CONFIG,
    "GET_READER_CONFIG",
    &[
        field("AntennaID", FieldType::U16),
        field("RequestedData", FieldType::EnumU8(&CONFIG_REQUESTED_DATA)),
        field("GPIPortNum", FieldType::U16),
        field("GPOPortNum", FieldType::U16),
    ],
    &[],
    Some(msg::GET_READER_CONFIG_RESPONSE),
);

pub static GET_READER_CONFIG_RESPONSE: TypeDescriptor = message(
    msg::GET_READER_CONFIG_RESPONSE,
    "GET_READER_CONFIG_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static SET_READER_CONFIG: TypeDescriptor = message(
    msg::SET_READER_CONFIG,
    "SET_READER_CONFIG",
    &[field("ResetToFactoryDefault", FieldType::Bool8)],
    &[],
    Some(msg::SET_READER_CONFIG_RESPONSE),
);

pub static SET_READER_CONFIG_RESPONSE: TypeDescriptor = message(
    msg::SET_READER_CONFIG_RESPONSE,
    "SET_READER_CONFIG_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static CLOSE_CONNECTION: TypeDescriptor = message(
    msg::CLOSE_CONNECTION,
    "CLOSE_CONNECTION",
    &[],
    &[],
    Some(msg::CLOSE_CONNECTION_RESPONSE),
);

pub static CLOSE_CONNECTION_RESPONSE: TypeDescriptor = message(
    msg::CLOSE_CONNECTION_RESPONSE,
    "CLOSE_CONNECTION_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static ADD_ROSPEC: TypeDescriptor = message(
    msg::ADD_ROSPEC,
    "ADD_ROSPEC",
    &[],
    &[one(param::RO_SPEC, "ROSpec")],
    Some(msg::ADD_ROSPEC_RESPONSE),
);

pub static ADD_ROSPEC_RESPONSE: TypeDescriptor = message(
    msg::ADD_ROSPEC_RESPONSE,
    "ADD_ROSPEC_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static DELETE_ROSPEC: TypeDescriptor = message(
    msg::DELETE_ROSPEC,
    "DELETE_ROSPEC",
    &[field("ROSpecID", FieldType::U32)],
    &[],
    Some(msg::DELETE_ROSPEC_RESPONSE),
);

pub static DELETE_ROSPEC_RESPONSE: TypeDescriptor = message(
    msg::DELETE_ROSPEC_RESPONSE,
    "DELETE_ROSPEC_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static START_ROSPEC: TypeDescriptor = message(
    msg::START_ROSPEC,
    "START_ROSPEC",
    &[field("ROSpecID", FieldType::U32)],
    &[],
    Some(msg::START_ROSPEC_RESPONSE),
);

pub static START_ROSPEC_RESPONSE: TypeDescriptor = message(
    msg::START_ROSPEC_RESPONSE,
    "START_ROSPEC_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static STOP_ROSPEC: TypeDescriptor = message(
    msg::STOP_ROSPEC,
    "STOP_ROSPEC",
    &[field("ROSpecID", FieldType::U32)],
    &[],
    Some(msg::STOP_ROSPEC_RESPONSE),
);

pub static STOP_ROSPEC_RESPONSE: TypeDescriptor = message(
    msg::STOP_ROSPEC_RESPONSE,
    "STOP_ROSPEC_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static ENABLE_ROSPEC: TypeDescriptor = message(
    msg::ENABLE_ROSPEC,
    "ENABLE_ROSPEC",
    &[field("ROSpecID", FieldType::U32)],
    &[],
    Some(msg::ENABLE_ROSPEC_RESPONSE),
);

pub static ENABLE_ROSPEC_RESPONSE: TypeDescriptor = message(
    msg::ENABLE_ROSPEC_RESPONSE,
    "ENABLE_ROSPEC_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static DISABLE_ROSPEC: TypeDescriptor = message(
    msg::DISABLE_ROSPEC,
    "DISABLE_ROSPEC",
    &[field("ROSpecID", FieldType::U32)],
    &[],
    Some(msg::DISABLE_ROSPEC_RESPONSE),
);

pub static DISABLE_ROSPEC_RESPONSE: TypeDescriptor = message(
    msg::DISABLE_ROSPEC_RESPONSE,
    "DISABLE_ROSPEC_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

pub static GET_ROSPECS: TypeDescriptor = message(
    msg::GET_ROSPECS,
    "GET_ROSPECS",
    &[],
    &[],
    Some(msg::GET_ROSPECS_RESPONSE),
);

pub static GET_ROSPECS_RESPONSE: TypeDescriptor = message(
    msg::GET_ROSPECS_RESPONSE,
    "GET_ROSPECS_RESPONSE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus"), many(param::RO_SPEC, "ROSpec")],
    None,
);

pub static RO_ACCESS_REPORT: TypeDescriptor = message(
    msg::RO_ACCESS_REPORT,
    "RO_ACCESS_REPORT",
    &[],
    &[many(param::TAG_REPORT_DATA, "TagReportData")],
    None,
);

pub static KEEPALIVE: TypeDescriptor = message(
    msg::KEEPALIVE,
    "KEEPALIVE",
    &[],
    &[],
    Some(msg::KEEPALIVE_ACK),
);

pub static KEEPALIVE_ACK: TypeDescriptor =
    message(msg::KEEPALIVE_ACK, "KEEPALIVE_ACK", &[], &[], None);

pub static READER_EVENT_NOTIFICATION: TypeDescriptor = message(
    msg::READER_EVENT_NOTIFICATION,
    "READER_EVENT_NOTIFICATION",
    &[],
    &[one(param::READER_EVENT_NOTIFICATION_DATA, "ReaderEventNotificationData")],
    None,
);

pub static ERROR_MESSAGE: TypeDescriptor = message(
    msg::ERROR_MESSAGE,
    "ERROR_MESSAGE",
    &[],
    &[one(param::LLRP_STATUS, "LLRPStatus")],
    None,
);

// Parameters.

pub static UTC_TIMESTAMP: TypeDescriptor = parameter(
    param::UTC_TIMESTAMP,
    "UTCTimestamp",
    &[field("Microseconds", FieldType::U64)],
    &[],
);

pub static RO_SPEC: TypeDescriptor = parameter(
    param::RO_SPEC,
    "ROSpec",
    &[
        field("ROSpecID", FieldType::U32),
        field("Priority", FieldType::U8),
        field("CurrentState", FieldType::EnumU8(&RO_SPEC_STATE)),
    ],
    &[
        one(param::RO_BOUNDARY_SPEC, "ROBoundarySpec"),
        some(param::AI_SPEC, "AISpec"),
        opt(param::RO_REPORT_SPEC, "ROReportSpec"),
    ],
);

pub static RO_BOUNDARY_SPEC: TypeDescriptor = parameter(
    param::RO_BOUNDARY_SPEC,
    "ROBoundarySpec",
    &[],
    &[
        one(param::RO_SPEC_START_TRIGGER, "ROSpecStartTrigger"),
        one(param::RO_SPEC_STOP_TRIGGER, "ROSpecStopTrigger"),
    ],
);

pub static RO_SPEC_START_TRIGGER: TypeDescriptor = parameter(
    param::RO_SPEC_START_TRIGGER,
    "ROSpecStartTrigger",
    &[field(
        "ROSpecStartTriggerType",
        FieldType::EnumU8(&RO_SPEC_START_TRIGGER_TYPE),
    )],
    &[],
);

pub static RO_SPEC_STOP_TRIGGER: TypeDescriptor = parameter(
    param::RO_SPEC_STOP_TRIGGER,
    "ROSpecStopTrigger",
    &[
        field(
            "ROSpecStopTriggerType",
            FieldType::EnumU8(&RO_SPEC_STOP_TRIGGER_TYPE),
        ),
        field("DurationTriggerValue", FieldType::U32),
    ],
    &[],
);

pub static AI_SPEC: TypeDescriptor = parameter(
    param::AI_SPEC,
    "AISpec",
    &[field("AntennaIDs", FieldType::U16V)],
    &[
        one(param::AI_SPEC_STOP_TRIGGER, "AISpecStopTrigger"),
        some(param::INVENTORY_PARAMETER_SPEC, "InventoryParameterSpec"),
    ],
);

pub static AI_SPEC_STOP_TRIGGER: TypeDescriptor = parameter(
    param::AI_SPEC_STOP_TRIGGER,
    "AISpecStopTrigger",
    &[
        field(
            "AISpecStopTriggerType",
            FieldType::EnumU8(&AI_SPEC_STOP_TRIGGER_TYPE),
        ),
        field("DurationTrigger", FieldType::U32),
    ],
    &[],
);

pub static INVENTORY_PARAMETER_SPEC: TypeDescriptor = parameter(
    param::INVENTORY_PARAMETER_SPEC,
    "InventoryParameterSpec",
    &[
        field("InventoryParameterSpecID", FieldType::U16),
        field("ProtocolID", FieldType::EnumU8(&AIR_PROTOCOL)),
    ],
    &[],
);

pub static RO_REPORT_SPEC: TypeDescriptor = parameter(
    param::RO_REPORT_SPEC,
    "ROReportSpec",
    &[
        field(
            "ROReportTrigger",
            FieldType::EnumU8(&RO_REPORT_TRIGGER_TYPE),
        ),
        field("N", FieldType::U16),
    ],
    &[one(param::TAG_REPORT_CONTENT_SELECTOR, "TagReportContentSelector")],
);

pub static TAG_REPORT_CONTENT_SELECTOR: TypeDescriptor = parameter(
    param::TAG_REPORT_CONTENT_SELECTOR,
    "TagReportContentSelector",
    &[field("EnableFlags", FieldType::U16)],
    &[],
);

pub static TAG_REPORT_DATA: TypeDescriptor = parameter(
    param::TAG_REPORT_DATA,
    "TagReportData",
    &[],
    &[
        opt(param::EPC_DATA, "EPCData"),
        opt(param::EPC_96, "EPC_96"),
        opt(param::RO_SPEC_ID, "ROSpecID"),
        opt(param::ANTENNA_ID, "AntennaID"),
        opt(param::PEAK_RSSI, "PeakRSSI"),
        opt(param::FIRST_SEEN_TIMESTAMP_UTC, "FirstSeenTimestampUTC"),
        opt(param::TAG_SEEN_COUNT, "TagSeenCount"),
    ],
);

pub static EPC_DATA: TypeDescriptor = parameter(
    param::EPC_DATA,
    "EPCData",
    &[field("EPC", FieldType::BytesV)],
    &[],
);

pub static EPC_96: TypeDescriptor = parameter(
    param::EPC_96,
    "EPC_96",
    &[field("EPC", FieldType::BytesV)],
    &[],
);

pub static RO_SPEC_ID: TypeDescriptor = parameter(
    param::RO_SPEC_ID,
    "ROSpecID",
    &[field("ROSpecID", FieldType::U32)],
    &[],
);

pub static ANTENNA_ID: TypeDescriptor = parameter(
    param::ANTENNA_ID,
    "AntennaID",
    &[field("AntennaID", FieldType::U16)],
    &[],
);

pub static PEAK_RSSI: TypeDescriptor = parameter(
    param::PEAK_RSSI,
    "PeakRSSI",
    &[field("PeakRSSI", FieldType::U8)],
    &[],
);

pub static FIRST_SEEN_TIMESTAMP_UTC: TypeDescriptor = parameter(
    param::FIRST_SEEN_TIMESTAMP_UTC,
    "FirstSeenTimestampUTC",
    &[field("Microseconds", FieldType::U64)],
    &[],
);

pub static TAG_SEEN_COUNT: TypeDescriptor = parameter(
    param::TAG_SEEN_COUNT,
    "TagSeenCount",
    &[field("TagCount", FieldType::U16)],
    &[],
);

pub static LLRP_STATUS: TypeDescriptor = parameter(
    param::LLRP_STATUS,
    "LLRPStatus",
    &[
        field("StatusCode", FieldType::EnumU16(&STATUS_CODE)),
        field("ErrorDescription", FieldType::Utf8V),
    ],
    &[opt(param::FIELD_ERROR, "FieldError"), opt(param::PARAMETER_ERROR, "ParameterError")],
);

pub static FIELD_ERROR: TypeDescriptor = parameter(
    param::FIELD_ERROR,
    "FieldError",
    &[
        field("FieldNum", FieldType::U16),
        field("ErrorCode", FieldType::EnumU16(&STATUS_CODE)),
    ],
    &[],
);

pub static PARAMETER_ERROR: TypeDescriptor = parameter(
    param::PARAMETER_ERROR,
    "ParameterError",
    &[
        field("ParameterType", FieldType::U16),
        field("ErrorCode", FieldType::EnumU16(&STATUS_CODE)),
    ],
    &[opt(param::FIELD_ERROR, "FieldError"), opt(param::PARAMETER_ERROR, "ParameterError")],
);

pub static READER_EVENT_NOTIFICATION_DATA: TypeDescriptor = parameter(
    param::READER_EVENT_NOTIFICATION_DATA,
    "ReaderEventNotificationData",
    &[],
    &[
        one(param::UTC_TIMESTAMP, "UTCTimestamp"),
        opt(param::CONNECTION_ATTEMPT_EVENT, "ConnectionAttemptEvent"),
        opt(param::ANTENNA_EVENT, "AntennaEvent"),
        opt(param::READER_EXCEPTION_EVENT, "ReaderExceptionEvent"),
    ],
);

pub static READER_EXCEPTION_EVENT: TypeDescriptor = parameter(
    param::READER_EXCEPTION_EVENT,
    "ReaderExceptionEvent",
    &[field("Message", FieldType::Utf8V)],
    &[],
);

pub static ANTENNA_EVENT: TypeDescriptor = parameter(
    param::ANTENNA_EVENT,
    "AntennaEvent",
    &[
        field("EventType", FieldType::EnumU8(&ANTENNA_EVENT_TYPE)),
        field("AntennaID", FieldType::U16),
    ],
    &[],
);

pub static CONNECTION_ATTEMPT_EVENT: TypeDescriptor = parameter(
    param::CONNECTION_ATTEMPT_EVENT,
    "ConnectionAttemptEvent",
    &[field(
        "Status",
        FieldType::EnumU16(&CONNECTION_ATTEMPT_STATUS),
    )],
    &[],
);

/// Every kind this build of the library understands, messages and
/// parameters alike. [`crate::registry::TypeRegistry::new`] indexes this.
pub static CORE_TYPES: &[&TypeDescriptor] = &[
    // Messages
    &GET_READER_CAPABILITIES,
    &GET_READER_CAPABILITIES_RESPONSE,
    &GET_READER_CONFIG,
    &GET_READER_CONFIG_RESPONSE,
    &SET_READER_CONFIG,
    &SET_READER_CONFIG_RESPONSE,
    &CLOSE_CONNECTION,
    &CLOSE_CONNECTION_RESPONSE,
    &ADD_ROSPEC,
    &ADD_ROSPEC_RESPONSE,
    &DELETE_ROSPEC,
    &DELETE_ROSPEC_RESPONSE,
    &START_ROSPEC,
    &START_ROSPEC_RESPONSE,
    &STOP_ROSPEC,
    &STOP_ROSPEC_RESPONSE,
    &ENABLE_ROSPEC,
    &ENABLE_ROSPEC_RESPONSE,
    &DISABLE_ROSPEC,
    &DISABLE_ROSPEC_RESPONSE,
    &GET_ROSPECS,
    &GET_ROSPECS_RESPONSE,
    &RO_ACCESS_REPORT,
    &KEEPALIVE,
    &KEEPALIVE_ACK,
    &READER_EVENT_NOTIFICATION,
    &ERROR_MESSAGE,
    // Parameters
    &UTC_TIMESTAMP,
    &RO_SPEC,
    &RO_BOUNDARY_SPEC,
    &RO_SPEC_START_TRIGGER,
    &RO_SPEC_STOP_TRIGGER,
    &AI_SPEC,
    &AI_SPEC_STOP_TRIGGER,
    &INVENTORY_PARAMETER_SPEC,
    &RO_REPORT_SPEC,
    &TAG_REPORT_CONTENT_SELECTOR,
    &TAG_REPORT_DATA,
    &EPC_DATA,
    &EPC_96,
    &RO_SPEC_ID,
    &ANTENNA_ID,
    &PEAK_RSSI,
    &FIRST_SEEN_TIMESTAMP_UTC,
    &TAG_SEEN_COUNT,
    &LLRP_STATUS,
    &FIELD_ERROR,
    &PARAMETER_ERROR,
    &READER_EVENT_NOTIFICATION_DATA,
    &READER_EXCEPTION_EVENT,
    &ANTENNA_EVENT,
    &CONNECTION_ATTEMPT_EVENT,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_type_numbers() {
        let mut seen = std::collections::HashSet::new();
        for td in CORE_TYPES {
            assert!(
                seen.insert((td.is_message, td.type_num)),
                "duplicate type number {} ({})",
                td.type_num,
                td.name
            );
        }
    }

    #[test]
    fn test_message_type_numbers_fit_ten_bits() {
        for td in CORE_TYPES.iter().filter(|t| t.is_message) {
            assert!(td.type_num <= 0x3FF, "{} overflows 10 bits", td.name);
        }
    }

    #[test]
    fn test_response_links_resolve() {
        for td in CORE_TYPES.iter().filter(|t| t.response_type.is_some()) {
            let rsp = td.response_type.unwrap();
            assert!(
                CORE_TYPES
                    .iter()
                    .any(|t| t.is_message && t.type_num == rsp),
                "{} links to unregistered response {}",
                td.name,
                rsp
            );
        }
    }

    #[test]
    fn test_child_links_resolve() {
        for td in CORE_TYPES {
            for child in td.children {
                assert!(
                    CORE_TYPES
                        .iter()
                        .any(|t| !t.is_message && t.type_num == child.param_type),
                    "{} references unregistered parameter {}",
                    td.name,
                    child.param_type
                );
            }
        }
    }
}
