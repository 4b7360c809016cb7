use crate::{BindOptions, JsonError, Value, JsonDeserialize};

/// What to bind a decoded value to.
#[derive(Debug)]
pub enum Target<'instance, T> {
  /// Don't bind the value, yielding it as-is.
  None,
  /// Construct a new instance of `T` and bind the value onto it.
  Type,
  /// Bind the value onto an existing instance.
  Instance(&'instance mut T),
}

/// The result of binding a decoded value.
#[derive(Debug)]
pub enum Bound<'instance, T> {
  /// The value, as decoded, as there was no target.
  Raw(Value),
  /// A newly constructed instance with the value bound onto it.
  Constructed(T),
  /// The existing instance, with the value bound onto it.
  Updated(&'instance mut T),
}

impl<'instance, T> Bound<'instance, T> {
  /// The value, if it wasn't bound.
  pub fn raw(self) -> Option<Value> {
    match self {
      Bound::Raw(value) => Some(value),
      Bound::Constructed(_) | Bound::Updated(_) => None,
    }
  }

  /// The instance, if one was constructed.
  pub fn constructed(self) -> Option<T> {
    match self {
      Bound::Constructed(instance) => Some(instance),
      Bound::Raw(_) | Bound::Updated(_) => None,
    }
  }

  /// The instance, if an existing one was updated.
  pub fn updated(self) -> Option<&'instance mut T> {
    match self {
      Bound::Updated(instance) => Some(instance),
      Bound::Raw(_) | Bound::Constructed(_) => None,
    }
  }
}

/// Bind a decoded value to a target.
///
/// When binding onto an existing instance, only the keys present within the value are overwritten.
/// This is not atomic, and a failure may leave the instance partially updated.
pub fn bind<'instance, T: JsonDeserialize>(
  value: Value,
  target: Target<'instance, T>,
  options: &BindOptions,
) -> Result<Bound<'instance, T>, JsonError> {
  Ok(match target {
    Target::None => Bound::Raw(value),
    Target::Type => Bound::Constructed(T::deserialize(value, options)?),
    Target::Instance(instance) => {
      instance.merge(value, options)?;
      Bound::Updated(instance)
    }
  })
}

#[cfg(test)]
mod tests {
  use crate::{*, structure::tests::{Event, event}};

  fn decoded() -> Value {
    deserialize_value(r#"{"name": "relaunch", "date": "2024-02-29"}"#).unwrap()
  }

  #[test]
  fn bind_none() {
    let bound = bind::<Event>(decoded(), Target::None, &BindOptions::default()).unwrap();
    assert_eq!(bound.raw(), Some(decoded()));
  }

  #[test]
  fn bind_type() {
    let bound = bind::<Event>(decoded(), Target::Type, &BindOptions::default()).unwrap();
    let event = bound.constructed().unwrap();
    assert_eq!(event.name, "relaunch");
    assert_eq!(event.date, chrono::NaiveDate::from_ymd_opt(2024, 2, 29));
    assert_eq!(event.attendees, 0);
  }

  #[test]
  fn bind_instance() {
    let mut event = event();
    let bound = bind(decoded(), Target::Instance(&mut event), &BindOptions::default()).unwrap();
    let updated = bound.updated().unwrap();
    updated.attendees += 1;
    assert_eq!(event.name, "relaunch");
    assert_eq!(event.attendees, 4);
  }
}
