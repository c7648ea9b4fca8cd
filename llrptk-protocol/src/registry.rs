//! The type registry: numeric kind -> descriptor lookup.

use crate::schema;
use crate::types::TypeDescriptor;
use std::collections::HashMap;

/// Immutable table of every known message and parameter kind.
///
/// Built once, then shared read-only (typically behind an `Arc`) by any
/// number of connections. Message and parameter numbering spaces are
/// independent, so the two maps are kept separate.
#[derive(Debug)]
pub struct TypeRegistry {
    messages: HashMap<u16, &'static TypeDescriptor>,
    parameters: HashMap<u16, &'static TypeDescriptor>,
}

impl TypeRegistry {
    /// Builds a registry over the built-in core schema.
    pub fn new() -> TypeRegistry {
        Self::with_types(schema::CORE_TYPES)
    }

    /// Builds a registry over an explicit descriptor list. Duplicate
    /// numbers within a numbering space are a schema bug.
    pub fn with_types(types: &[&'static TypeDescriptor]) -> TypeRegistry {
        let mut messages = HashMap::new();
        let mut parameters = HashMap::new();
        for td in types {
            let prior = if td.is_message {
                messages.insert(td.type_num, *td)
            } else {
                parameters.insert(td.type_num, *td)
            };
            debug_assert!(prior.is_none(), "duplicate type number {}", td.type_num);
        }
        TypeRegistry {
            messages,
            parameters,
        }
    }

    /// Looks up a message kind. `None` is a hard decode error for the
    /// caller: top-level kinds must be known.
    pub fn message(&self, type_num: u16) -> Option<&'static TypeDescriptor> {
        self.messages.get(&type_num).copied()
    }

    /// Looks up a parameter kind. `None` is tolerated by the decoder,
    /// which wraps the parameter as an opaque element.
    pub fn parameter(&self, type_num: u16) -> Option<&'static TypeDescriptor> {
        self.parameters.get(&type_num).copied()
    }

    /// The descriptor a request kind expects in reply, if it declares one.
    pub fn response_of(&self, request: &TypeDescriptor) -> Option<&'static TypeDescriptor> {
        request.response_type.and_then(|t| self.message(t))
    }

    /// Number of registered kinds, messages plus parameters.
    pub fn len(&self) -> usize {
        self.messages.len() + self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.parameters.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{msg, param};

    #[test]
    fn test_core_lookups() {
        let registry = TypeRegistry::new();

        let add = registry.message(msg::ADD_ROSPEC).unwrap();
        assert_eq!(add.name, "ADD_ROSPEC");
        assert!(add.is_message);

        let status = registry.parameter(param::LLRP_STATUS).unwrap();
        assert_eq!(status.name, "LLRPStatus");
        assert!(!status.is_message);
    }

    #[test]
    fn test_numbering_spaces_are_independent() {
        let registry = TypeRegistry::new();
        // AntennaID is parameter type 1; message type 1 is
        // GET_READER_CAPABILITIES.
        assert_eq!(registry.parameter(1).unwrap().name, "AntennaID");
        assert_eq!(
            registry.message(1).unwrap().name,
            "GET_READER_CAPABILITIES"
        );
    }

    #[test]
    fn test_unknown_kind_is_none() {
        let registry = TypeRegistry::new();
        assert!(registry.message(999).is_none());
        assert!(registry.parameter(1000).is_none());
    }

    #[test]
    fn test_response_link() {
        let registry = TypeRegistry::new();
        let req = registry.message(msg::START_ROSPEC).unwrap();
        let rsp = registry.response_of(req).unwrap();
        assert_eq!(rsp.type_num, msg::START_ROSPEC_RESPONSE);

        let report = registry.message(msg::RO_ACCESS_REPORT).unwrap();
        assert!(registry.response_of(report).is_none());
    }
}
