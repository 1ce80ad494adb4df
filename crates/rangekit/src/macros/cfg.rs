#[macro_export]
#[doc(hidden)]
macro_rules! cfg_profiler {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "profiler")]
            $item
        )*
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! cfg_std {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "std")]
            $item
        )*
    }
}
