use crate::error::UnitError;
use crate::unit::atomic::{AtomicUnit, Expansion};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::HashMap;

/// One entry of the static unit-definition table.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitDef {
    pub symbol: String,
    pub dimension: String,
    /// Factor converting one of this unit into the dimension's base unit.
    pub magnitude: f64,
    /// Affine shift, present only for temperature-like units.
    #[serde(default)]
    pub offset: Option<f64>,
    /// Decomposition recipe for compound units (e.g. N -> kg m s^-2).
    #[serde(default)]
    pub expansion: Option<ExpansionDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionDef {
    pub magnitude: f64,
    pub factors: Vec<FactorDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactorDef {
    pub symbol: String,
    pub exp: f64,
}

#[derive(Debug, Deserialize)]
struct UnitTable {
    unit: Vec<UnitDef>,
}

lazy_static! {
    static ref UNITS: HashMap<String, UnitDef> = {
        let table: UnitTable = toml::from_str(include_str!("units.toml"))
            .expect("embedded unit table is malformed");
        let mut map = HashMap::new();
        for def in table.unit {
            map.insert(def.symbol.clone(), def);
        }
        map
    };

    /// dimension name -> symbol of its base unit (magnitude 1, no offset)
    static ref DIMENSION_BASES: HashMap<String, String> = {
        let mut map = HashMap::new();
        for def in UNITS.values() {
            if def.magnitude == 1.0 && def.offset.is_none() {
                map.insert(def.dimension.clone(), def.symbol.clone());
            }
        }
        map
    };
}

/// Look up a unit definition by symbol.
pub fn lookup(symbol: &str) -> Option<&'static UnitDef> {
    UNITS.get(symbol)
}

/// Symbol of the base unit for a dimension.
pub fn base_symbol(dimension: &str) -> Option<&'static str> {
    DIMENSION_BASES.get(dimension).map(|s| s.as_str())
}

/// Build an atomic unit for `symbol` raised to `exp` from the definition table.
pub fn atomic(symbol: &str, exp: f64) -> Result<AtomicUnit, UnitError> {
    let def = lookup(symbol).ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))?;

    let expansion = match &def.expansion {
        Some(recipe) => {
            let mut factors = Vec::with_capacity(recipe.factors.len());
            for f in &recipe.factors {
                factors.push(atomic(&f.symbol, f.exp)?);
            }
            Some(Expansion {
                factors,
                magnitude: recipe.magnitude,
            })
        }
        None => None,
    };

    Ok(AtomicUnit {
        symbol: def.symbol.clone(),
        dimension: def.dimension.clone(),
        exp,
        magnitude: def.magnitude,
        offset: def.offset,
        expansion,
    })
}
