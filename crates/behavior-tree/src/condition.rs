//! Condition leaves over blackboard variables.

use std::any::Any;

use crate::blackboard::{Blackboard, Key};
use crate::{Behavior, Status};

/// Reduces one blackboard variable to a status.
///
/// # Semantics
///
/// - key absent → `Failure` (a missing input is an ordinary miss, not a
///   fault; see the crate-level error notes)
/// - stored value equals the expected value → `Success`
/// - otherwise → `Failure`
///
/// Reading is non-consuming by default: one-shot events are normally reset
/// by their writer once observed, or kept selected via a
/// [`Remap`](crate::decorator::Remap) decorator. For the cases where the
/// condition itself should eat the flag, enable [`consuming`](Self::consuming).
pub struct CheckBlackboardVariable<T> {
    name: String,
    status: Status,
    blackboard: Blackboard,
    key: Key<T>,
    expected: T,
    consuming: bool,
}

impl<T> CheckBlackboardVariable<T>
where
    T: Any + Send + Sync + Clone + PartialEq,
{
    pub fn new(
        name: impl Into<String>,
        blackboard: Blackboard,
        key: Key<T>,
        expected: T,
    ) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            blackboard,
            key,
            expected,
            consuming: false,
        }
    }

    /// Clears the key from the blackboard on a successful match, consuming
    /// a one-shot event flag.
    pub fn consuming(mut self) -> Self {
        self.consuming = true;
        self
    }
}

impl<T> Behavior for CheckBlackboardVariable<T>
where
    T: Any + Send + Sync + Clone + PartialEq,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn update(&mut self) -> Status {
        match self.blackboard.get(&self.key) {
            None => {
                tracing::debug!(node = %self.name, key = self.key.name(), "variable not set");
                Status::Failure
            }
            Some(value) if value == self.expected => {
                if self.consuming {
                    self.blackboard.clear(&self.key);
                }
                Status::Success
            }
            Some(_) => Status::Failure,
        }
    }
}
