/// Which tray icon variant is active.
///
/// Travels on the wire as the decimal value of the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconType {
    /// Plain application icon.
    #[default]
    Blank = 0,
    /// Stock new-mail icon.
    NewMail = 1,
    /// User supplied icon carried in the preference record.
    Custom = 2,
}

impl IconType {
    /// Wire value of this icon type.
    pub fn as_wire(self) -> i64 {
        self as i64
    }

    /// Map a wire value back to an icon type. Unknown values yield `None`.
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(IconType::Blank),
            1 => Some(IconType::NewMail),
            2 => Some(IconType::Custom),
            _ => None,
        }
    }
}
