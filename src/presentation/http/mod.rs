pub mod clients;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod programs;

/// Distinguishes an absent JSON field from an explicit null, for partial
/// updates on nullable columns.
#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    /// Collapses to the patch shape: None = keep, Some(None) = clear,
    /// Some(Some(v)) = set.
    pub fn into_patch(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

pub(crate) fn deserialize_double_option<'de, D, T>(
    deserializer: D,
) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}
