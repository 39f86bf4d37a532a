//! Macros for declaring consumer signals.

/// Declare a set of user signals numbered upward from
/// [`Signal::USER_BASE`](crate::core::Signal::USER_BASE).
///
/// The generated enum converts into [`Signal`](crate::core::Signal), back
/// out of one with `TryFrom`, and builds payload-free events with `event()`.
///
/// # Example
///
/// ```
/// use fsm_dispatch::core::Signal;
/// use fsm_dispatch::signals;
///
/// signals! {
///     pub enum DoorSignal {
///         Open,
///         Close,
///         Lock,
///     }
/// }
///
/// assert_eq!(DoorSignal::Open.signal(), Signal::new(4));
/// assert_eq!(DoorSignal::Lock.signal(), Signal::new(6));
/// assert_eq!(DoorSignal::try_from(Signal::new(5)), Ok(DoorSignal::Close));
/// assert!(DoorSignal::try_from(Signal::ENTRY).is_err());
/// ```
#[macro_export]
macro_rules! signals {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident
            $(
                , $(#[$variant_meta:meta])*
                $variant:ident
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u32)]
        $vis enum $name {
            $(#[$first_meta])*
            $first = $crate::core::Signal::USER_BASE,
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// The signal value of this variant.
            pub const fn signal(self) -> $crate::core::Signal {
                $crate::core::Signal::new(self as u32)
            }

            /// A payload-free event carrying this signal.
            pub const fn event<P>(self) -> $crate::core::Event<P> {
                $crate::core::Event::new(self.signal())
            }
        }

        impl ::core::convert::From<$name> for $crate::core::Signal {
            fn from(value: $name) -> Self {
                value.signal()
            }
        }

        impl ::core::convert::TryFrom<$crate::core::Signal> for $name {
            type Error = $crate::core::SignalError;

            fn try_from(signal: $crate::core::Signal) -> ::core::result::Result<Self, Self::Error> {
                if signal == Self::$first.signal() {
                    return Ok(Self::$first);
                }
                $(
                    if signal == Self::$variant.signal() {
                        return Ok(Self::$variant);
                    }
                )*
                match signal.reserved() {
                    Some(reserved) => Err($crate::core::SignalError::Reserved {
                        value: signal.value(),
                        name: reserved.name(),
                    }),
                    None => Err($crate::core::SignalError::Unknown {
                        value: signal.value(),
                    }),
                }
            }
        }
    };
}
