/// generates a `Context` trait for the given error type along with the
/// `Option<T>` implementation. the error type must implement `From<String>`
#[macro_export]
macro_rules! context_trait {
    ($e:path) => {
        pub trait Context<T, E> {
            fn context<C>(self, cxt: C) -> std::result::Result<T, $e>
            where
                C: Into<String>;
        }

        impl<T> Context<T, ()> for std::option::Option<T> {
            fn context<C>(self, cxt: C) -> std::result::Result<T, $e>
            where
                C: Into<String>
            {
                match self {
                    Some(v) => Ok(v),
                    None => Err(<$e>::from(cxt.into()))
                }
            }
        }
    };
}
