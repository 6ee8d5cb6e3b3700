//! Batch-size field resolution
//!
//! The field is looked up once, before any trial, at two canonical locations:
//! a top-level attribute of the trainable and an entry of its [`HParams`].
//! Reads prefer the attribute; writes go to every location that has the field.
//!
//! [`HParams`]: super::HParams

use super::error::{Result, ScaleError};
use super::hparams::ParamValue;
use super::trainable::Trainable;

/// Where the batch-size field was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// Top-level attribute only
    Attribute,
    /// Hyperparameter holder only
    HParams,
    /// Both; kept in sync on every write
    Both,
}

/// A resolved handle on the trainable's batch-size field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSizeField {
    name: String,
    location: FieldLocation,
}

impl BatchSizeField {
    /// Find `name` on the trainable
    ///
    /// Fails with [`ScaleError::Configuration`] when neither location holds the
    /// field, or when the value found is not a positive integer.
    pub fn resolve<T: Trainable>(trainable: &T, name: &str) -> Result<Self> {
        let top_level = trainable.attribute(name).is_some();
        let nested = trainable.hparams().is_some_and(|h| h.contains(name));

        let location = match (top_level, nested) {
            (true, true) => FieldLocation::Both,
            (true, false) => FieldLocation::Attribute,
            (false, true) => FieldLocation::HParams,
            (false, false) => {
                return Err(ScaleError::Configuration(format!(
                    "Field '{name}' not found in the trainable's attributes or hparams. \
                     Set a batch size on the trainer, or pass batch_arg_name"
                )))
            }
        };

        let field = Self { name: name.to_string(), location };
        let value = field.get(trainable)?;
        if value == 0 {
            return Err(ScaleError::Configuration(format!("Field '{name}' must be > 0, found 0")));
        }
        Ok(field)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> FieldLocation {
        self.location
    }

    /// Current value of the field
    pub fn get<T: Trainable>(&self, trainable: &T) -> Result<usize> {
        match self.location {
            FieldLocation::Attribute | FieldLocation::Both => {
                trainable.attribute(&self.name).ok_or_else(|| self.missing())
            }
            FieldLocation::HParams => {
                let value = trainable
                    .hparams()
                    .and_then(|h| h.get(&self.name))
                    .ok_or_else(|| self.missing())?;
                value
                    .as_int()
                    .and_then(|v| usize::try_from(v).ok())
                    .ok_or_else(|| {
                        ScaleError::Configuration(format!(
                            "Field '{}' in hparams is not a non-negative integer: {value}",
                            self.name
                        ))
                    })
            }
        }
    }

    /// Write `value` to every location holding the field
    pub fn set<T: Trainable>(&self, trainable: &mut T, value: usize) -> Result<()> {
        if matches!(self.location, FieldLocation::Attribute | FieldLocation::Both)
            && !trainable.set_attribute(&self.name, value)
        {
            return Err(self.missing());
        }
        if matches!(self.location, FieldLocation::HParams | FieldLocation::Both) {
            let hparams = trainable.hparams_mut().ok_or_else(|| self.missing())?;
            hparams.insert(self.name.clone(), ParamValue::from(value));
        }
        Ok(())
    }

    fn missing(&self) -> ScaleError {
        ScaleError::Configuration(format!("Field '{}' is no longer available", self.name))
    }
}
