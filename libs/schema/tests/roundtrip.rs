//! Serialization round-trip law: decode(encode(x)) == x.

use fdom_schema::codec::{self, Format};
use fdom_schema::{FailureDomainList, FailureDomainSpec};
use fdom_testing::strategies;
use proptest::prelude::*;

proptest! {
    #[test]
    fn spec_json_roundtrip(spec in strategies::spec()) {
        let json = serde_json::to_string(&spec).unwrap();
        let back: FailureDomainSpec = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, spec);
    }

    #[test]
    fn spec_yaml_roundtrip(spec in strategies::spec()) {
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let back: FailureDomainSpec = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, spec);
    }

    #[test]
    fn resource_document_roundtrip(resource in strategies::resource(), yaml in any::<bool>()) {
        let format = if yaml { Format::Yaml } else { Format::Json };
        let encoded = codec::encode(&resource, format).unwrap();
        let decoded = codec::decode(&encoded, format).unwrap();
        prop_assert_eq!(decoded, vec![resource]);
    }

    #[test]
    fn list_document_roundtrip(items in proptest::collection::vec(strategies::resource(), 0..5)) {
        let list = FailureDomainList::new(items.clone());
        let encoded = codec::encode_yaml(&list).unwrap();
        prop_assert_eq!(codec::decode_yaml(&encoded).unwrap(), items);
    }

    #[test]
    fn auto_configure_presence_is_preserved(spec in strategies::spec()) {
        let value = serde_json::to_value(&spec).unwrap();
        prop_assert_eq!(
            value["region"].get("autoConfigure").is_some(),
            spec.region.auto_configure.is_some()
        );
        prop_assert_eq!(
            value["zone"].get("autoConfigure").is_some(),
            spec.zone.auto_configure.is_some()
        );
    }
}
