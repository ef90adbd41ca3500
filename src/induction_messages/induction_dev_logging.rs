// LOOP TRANSFORMATION LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_induction")]
macro_rules! induction_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_induction"))]
macro_rules! induction_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// GOTO PROGRAM LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_goto")]
macro_rules! goto_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_goto"))]
macro_rules! goto_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// Extra timer logging
#[macro_export]
#[cfg(feature = "detailed_timers")]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        saying::say!($msg, Green #$time.elapsed());
    };
}

#[macro_export]
#[cfg(not(feature = "detailed_timers"))]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        // Nothing
    };
}
