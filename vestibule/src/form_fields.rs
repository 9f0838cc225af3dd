/// Create a focus-ring enum for a form: tab cycles forward, shift-tab
/// cycles backward, and the first listed field is where focus starts.
#[macro_export]
macro_rules! form_fields {
    ($name:ident, $($variant:ident),*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            const FIELDS: &'static [$name] = &[
                $($name::$variant),*
            ];

            fn index(self) -> usize {
                match self {
                    $(Self::$variant => $name::$variant as usize),*
                }
            }

            /// The next field in the ring (e.g. with tab)
            fn next(self) -> Self {
                Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
            }

            /// The previous field in the ring (e.g. with shift-tab)
            fn prev(self) -> Self {
                Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::FIELDS[0]
            }
        }
    };
}
