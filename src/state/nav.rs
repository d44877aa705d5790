//! Sidebar entries and which roles see them.
//!
//! Visibility follows the token's role claim, which is unverified. Hiding an
//! entry is a convenience; the backend still decides every request.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::session::RoleKind::{Cuidador, Limpieza, Rrhh, Taquilla, Veterinario};
use crate::session::{RoleHint, RoleKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub section: NavSection,
    /// Roles besides admin that see the entry. Empty means everyone.
    pub roles: &'static [RoleKind],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavSection {
    General,
    Operaciones,
    Personal,
    Administracion,
}

impl NavSection {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Operaciones => "Operaciones",
            Self::Personal => "Personal",
            Self::Administracion => "Administración",
        }
    }
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/", label: "Dashboard", section: NavSection::General, roles: &[] },
    NavItem { path: "/animales", label: "Animales", section: NavSection::Operaciones, roles: &[Veterinario, Cuidador] },
    NavItem { path: "/alimentos", label: "Alimentos", section: NavSection::Operaciones, roles: &[Cuidador] },
    NavItem { path: "/dietas", label: "Dietas", section: NavSection::Operaciones, roles: &[Veterinario, Cuidador] },
    NavItem { path: "/clinico", label: "Clínico", section: NavSection::Operaciones, roles: &[Veterinario] },
    NavItem { path: "/limpieza", label: "Limpieza", section: NavSection::Operaciones, roles: &[Limpieza] },
    NavItem { path: "/entradas", label: "Entradas", section: NavSection::Operaciones, roles: &[Taquilla] },
    NavItem { path: "/empleados", label: "Empleados", section: NavSection::Personal, roles: &[Rrhh] },
    NavItem { path: "/rrhh/vacaciones", label: "Vacaciones", section: NavSection::Personal, roles: &[Rrhh] },
    NavItem { path: "/rrhh/inasistencias", label: "Inasistencias", section: NavSection::Personal, roles: &[Rrhh] },
    NavItem { path: "/rrhh/descuentos", label: "Descuentos", section: NavSection::Personal, roles: &[Rrhh] },
    NavItem { path: "/rrhh/bonos", label: "Bonos", section: NavSection::Personal, roles: &[Rrhh] },
    NavItem { path: "/usuarios", label: "Usuarios", section: NavSection::Administracion, roles: &[] },
];

impl NavItem {
    /// Whether the entry is shown for `role`. `/usuarios` is admin-only.
    #[must_use]
    pub fn visible_to(&self, role: Option<&RoleHint>) -> bool {
        let kind = role.map_or(RoleKind::Other, RoleHint::kind);
        if kind == RoleKind::Admin {
            return true;
        }
        if self.section == NavSection::Administracion {
            return false;
        }
        self.roles.is_empty() || self.roles.contains(&kind)
    }
}

/// Entries shown for `role`, in menu order.
#[must_use]
pub fn visible_items(role: Option<&RoleHint>) -> Vec<&'static NavItem> {
    NAV_ITEMS.iter().filter(|item| item.visible_to(role)).collect()
}

/// Longest entry whose path prefixes `current`.
#[must_use]
pub fn active_item(current: &str) -> Option<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| {
            if item.path == "/" {
                current == "/"
            } else {
                current == item.path || current.starts_with(&format!("{}/", item.path))
            }
        })
        .max_by_key(|item| item.path.len())
}
