//! Class table for the GTSRB traffic-sign dataset
//!
//! The model's final layer width must equal the length of this table; the
//! weight loader checks that invariant at startup.

use crate::NUM_CLASSES;

/// Class names for the GTSRB dataset (43 classes), indexed by the model's
/// output position.
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "Speed limit (20km/h)",
    "Speed limit (30km/h)",
    "Speed limit (50km/h)",
    "Speed limit (60km/h)",
    "Speed limit (70km/h)",
    "Speed limit (80km/h)",
    "End of speed limit (80km/h)",
    "Speed limit (100km/h)",
    "Speed limit (120km/h)",
    "No passing",
    "No passing for vehicles over 3.5 metric tons",
    "Right-of-way at the next intersection",
    "Priority road",
    "Yield",
    "Stop",
    "No vehicles",
    "Vehicles over 3.5 metric tons prohibited",
    "No entry",
    "General caution",
    "Dangerous curve to the left",
    "Dangerous curve to the right",
    "Double curve",
    "Bumpy road",
    "Slippery road",
    "Road narrows on the right",
    "Road work",
    "Traffic signals",
    "Pedestrians",
    "Children crossing",
    "Bicycles crossing",
    "Beware of ice/snow",
    "Wild animals crossing",
    "End of all speed and passing limits",
    "Turn right ahead",
    "Turn left ahead",
    "Ahead only",
    "Go straight or right",
    "Go straight or left",
    "Keep right",
    "Keep left",
    "Roundabout mandatory",
    "End of no passing",
    "End of no passing by vehicles over 3.5 metric tons",
];

/// Get the class name for a given label index
pub fn class_name(label: usize) -> Option<&'static str> {
    CLASS_NAMES.get(label).copied()
}

/// Get the label index for a given class name
pub fn class_index(name: &str) -> Option<usize> {
    CLASS_NAMES.iter().position(|&n| n == name)
}

/// Check if a class is a speed-limit sign (including the "end of" variants)
pub fn is_speed_limit(label: usize) -> bool {
    CLASS_NAMES
        .get(label)
        .map(|name| name.contains("peed limit"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_model_width() {
        assert_eq!(CLASS_NAMES.len(), NUM_CLASSES);
        assert_eq!(CLASS_NAMES.len(), 43);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name(0), Some("Speed limit (20km/h)"));
        assert_eq!(class_name(14), Some("Stop"));
        assert_eq!(
            class_name(42),
            Some("End of no passing by vehicles over 3.5 metric tons")
        );
        assert_eq!(class_name(43), None);
    }

    #[test]
    fn test_class_index() {
        assert_eq!(class_index("Stop"), Some(14));
        assert_eq!(class_index("Yield"), Some(13));
        assert_eq!(class_index("Flying saucer crossing"), None);
    }

    #[test]
    fn test_is_speed_limit() {
        assert!(is_speed_limit(0)); // Speed limit (20km/h)
        assert!(is_speed_limit(6)); // End of speed limit (80km/h)
        assert!(!is_speed_limit(14)); // Stop
        assert!(!is_speed_limit(100)); // out of range
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in CLASS_NAMES.iter().enumerate() {
            for b in CLASS_NAMES.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
