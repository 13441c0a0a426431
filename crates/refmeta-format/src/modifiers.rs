//! Packed modifier bitmask shared by class, method and field records.
//!
//! The low twelve bits follow the standard reflection modifier layout, so a
//! consumer can test fields and methods with one vocabulary. Two positions are
//! reused depending on member kind: `VOLATILE` is `BRIDGE` on methods and
//! `TRANSIENT` is `VARARGS` on methods.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Reflection modifier flags
    pub struct Modifiers: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        /// Field is volatile
        const VOLATILE = 0x0040;
        /// Method is a compiler-generated bridge (same bit as `VOLATILE`)
        const BRIDGE = 0x0040;
        /// Field is transient
        const TRANSIENT = 0x0080;
        /// Method takes a variable number of arguments (same bit as `TRANSIENT`)
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        /// Introduced by the compiler, not declared in source
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        /// Enum type, or a field holding an enum constant
        const ENUM = 0x4000;
        /// Class has no declared name
        const ANONYMOUS = 0x8000;
        /// Annotation type element declaring a default value
        const ANNOTATION_DEFAULT = 0x10000;
    }
}

impl Modifiers {
    /// Visibility bits only.
    pub fn access(self) -> Self {
        self & (Self::PUBLIC | Self::PRIVATE | Self::PROTECTED)
    }

    /// Mask as written into emitted tables.
    pub fn to_hex(self) -> String {
        format!("0x{:x}", self.bits())
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modifiers({})", self.to_hex())
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
