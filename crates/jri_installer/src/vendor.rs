use std::fmt::Display;

/// A distribution source for Java runtimes.
///
/// Defined once at startup, never mutated. The `id` doubles
/// as the key under which the metadata index publishes the
/// vendor's version list.
#[derive(Debug, PartialEq, Eq)]
pub struct Vendor {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const VENDORS: &[Vendor] = &[
    Vendor {
        id: "net.minecraft.java",
        name: "Mojang",
        icon: "mojang",
    },
    Vendor {
        id: "net.adoptium.java",
        name: "Adoptium",
        icon: "adoptium",
    },
    Vendor {
        id: "com.azul.java",
        name: "Azul",
        icon: "azul",
    },
];

impl Vendor {
    #[must_use]
    pub fn get(id: &str) -> Option<&'static Vendor> {
        VENDORS.iter().find(|v| v.id == id)
    }
}

impl Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
