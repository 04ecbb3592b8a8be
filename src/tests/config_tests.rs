//! Configuration tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::{Category, ConfigError};
    use crate::*;

    #[test]
    fn test_empty_generator() {
        let err = IdGenerator::builder("empty").build().unwrap_err();
        assert_eq!(err, ConfigError::NoFields);
    }

    #[test]
    fn test_duplicate_names() {
        let err = IdGenerator::builder("dup")
            .field(NumberField::new("n", 4))
            .field(NumberField::new("n", 4))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateField {
                field: "n".to_string()
            }
        );
    }

    #[test]
    fn test_total_bits_limit() {
        let err = IdGenerator::builder("wide")
            .field(NumberField::new("a", 33))
            .field(NumberField::new("b", 32))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::TooManyBits { total: 65 });
        assert_eq!(err.to_string(), "Fields need 65 bits, at most 64 are available");
    }

    #[test]
    fn test_zero_bits() {
        let err = IdGenerator::builder("zero")
            .field(SequenceField::new("s", 0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBits {
                field: "s".to_string(),
                bits: 0
            }
        );
    }

    #[test]
    fn test_number_range_validation() {
        let err = IdGenerator::builder("range")
            .field(NumberField::new("n", 4).start(9).end(3))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRange {
                field: "n".to_string(),
                min: 9,
                max: 3
            }
        );

        let err = IdGenerator::builder("range")
            .field(NumberField::new("n", 4).end(16))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { max: 16, .. }));
    }

    #[test]
    fn test_sequence_span_validation() {
        let err = IdGenerator::builder("span")
            .field(SequenceField::new("s", 8).step((5, 1)))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRange {
                field: "s".to_string(),
                min: 5,
                max: 1
            }
        );
    }

    #[test]
    fn test_sequence_start_must_fit_mask() {
        let err = IdGenerator::builder("start")
            .field(SequenceField::new("s", 8).start((0, 10000)))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRange {
                field: "s".to_string(),
                min: 0,
                max: 10000
            }
        );

        assert!(IdGenerator::builder("start")
            .field(SequenceField::new("s", 8).start((0, 255)))
            .build()
            .is_ok());
    }

    #[test]
    fn test_single_sequence_per_layout() {
        let err = IdGenerator::builder("two")
            .field(SequenceField::new("a", 8))
            .field(SequenceField::new("b", 8))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MultipleSequences {
                first: "a".to_string(),
                second: "b".to_string()
            }
        );
        assert_eq!(err.to_string(), "Field b is a second sequence after a");
    }

    #[test]
    fn test_sequence_keys_must_come_first() {
        // keys on a field declared after it, which it could never see
        let err = IdGenerator::builder("order")
            .field(SequenceField::new("sequence", 16).keys(["time"]))
            .field(DateTimeField::new(
                "time",
                29,
                DateTimePrecision::Second,
                field::default_base(),
            ))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownKey {
                field: "sequence".to_string(),
                key: "time".to_string()
            }
        );
    }

    #[test]
    fn test_categories() {
        let order = Category::Order
            .generator(Arc::new(MemoryStore::new()))
            .unwrap();
        assert_eq!(order.name(), "order");
        assert_eq!(order.total_bits(), 46);

        let order_m = Category::OrderMinute
            .generator(Arc::new(MemoryStore::new()))
            .unwrap();
        assert_eq!(order_m.total_bits(), 45);
        let bits: Vec<_> = order_m.fields().iter().map(Field::bits).collect();
        assert_eq!(bits, [1, 24, 20]);
    }

    #[test]
    fn test_category_names() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
            assert_eq!(category.to_string(), category.cache_name());
        }
        assert!("invoice".parse::<Category>().is_err());
    }
}
