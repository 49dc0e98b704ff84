//! Task identifiers and callbacks
//!
//! A task is a callback bound to one slot of the timer queue. Slots are
//! addressed by a small enumerated identifier whose declaration order is
//! also the order in which due tasks fire within a dispatch pass.

/// Enumerated task identifier
///
/// Implementors map each identifier to a dense index in `0..COUNT`.
/// Use [`task_ids!`](crate::task_ids) rather than implementing this by hand.
pub trait TaskId: Copy + 'static {
    /// Number of identifiers (the required queue capacity)
    const COUNT: usize;

    /// Slot index for this identifier
    fn index(self) -> usize;

    /// Identifier for a slot index
    fn from_index(index: usize) -> Option<Self>;
}

/// A periodic task body
///
/// Runs to completion each time its slot comes due. Bodies take no
/// arguments and cannot fail; shared state lives in statics the task
/// reaches on its own. Any `Fn() + Sync` (including plain `fn()`) is a task.
pub trait Task: Sync {
    fn run(&self);
}

impl<F> Task for F
where
    F: Fn() + Sync,
{
    #[inline]
    fn run(&self) {
        self()
    }
}

/// Declare a task identifier enum
///
/// Generates a `#[repr(u8)]` enum deriving `Debug`, `Clone`, `Copy`,
/// `PartialEq` and `Eq`, an `ALL` array in declaration order, and the
/// [`TaskId`] impl.
///
/// ```ignore
/// eertos::task_ids! {
///     pub enum Tasks { Buttons, Display, Countdown }
/// }
///
/// static QUEUE: TimerQueue<Tasks, 3> = TimerQueue::new();
/// ```
#[macro_export]
macro_rules! task_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every identifier, in dispatch order
            pub const ALL: [$name; <$name as $crate::TaskId>::COUNT] = [$($name::$variant),+];
        }

        impl $crate::TaskId for $name {
            const COUNT: usize = [$($name::$variant),+].len();

            #[inline]
            fn index(self) -> usize {
                self as usize
            }

            #[inline]
            fn from_index(index: usize) -> ::core::option::Option<Self> {
                Self::ALL.get(index).copied()
            }
        }
    };
}
