use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Store identity the storefront is deployed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBrand {
    /// Professional audio and DJ equipment.
    Audio,
    /// Steel and stainless-steel kitchen equipment.
    Steel,
}

#[derive(Debug, Error)]
#[error("unknown store brand `{0}`, expected `audio` or `steel`")]
pub struct UnknownBrand(pub String);

impl FromStr for StoreBrand {
    type Err = UnknownBrand;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "audio" | "jake" => Ok(StoreBrand::Audio),
            "steel" | "equimas" => Ok(StoreBrand::Steel),
            other => Err(UnknownBrand(other.to_string())),
        }
    }
}

/// Copy and metaobject types that differ between the two stores.
#[derive(Debug, Clone, Serialize)]
pub struct BrandProfile {
    pub brand: StoreBrand,
    pub name: &'static str,
    pub site_title: &'static str,
    pub description: &'static str,
    pub announcements: &'static [&'static str],
    pub about: &'static [&'static str],
    pub address: &'static str,
    /// Metaobject type of the home hero slides.
    pub hero_type: &'static str,
    /// Metaobject type of the promotional banner.
    pub promo_banner_type: &'static str,
    /// Metaobject type of the best product poster.
    pub best_product_type: &'static str,
    /// Metaobject type of the brand banner, audio store only.
    pub brand_banner_type: Option<&'static str>,
    /// Made-to-measure call to action, steel store only.
    pub custom_work: Option<CustomWork>,
}

/// Call to action inviting visitors to order custom-built equipment.
#[derive(Debug, Clone, Serialize)]
pub struct CustomWork {
    pub title: &'static str,
    pub subtitle: &'static str,
}

const ANNOUNCEMENTS: &[&str] = &[
    "Envíos a todo Colombia 🇨🇴",
    "Pago contra entrega 💵",
    "Créditos con Brisa y Banco de Bogotá 🏦",
];

impl StoreBrand {
    pub fn profile(self) -> BrandProfile {
        match self {
            StoreBrand::Audio => BrandProfile {
                brand: self,
                name: "Jake Tienda Electrónica",
                site_title: "Jake Tienda Electrónica | Audio profesional",
                description: "Parlantes, consolas, controladoras DJ, subwoofers y más. \
                              Envío nacional y opciones de financiación.",
                announcements: ANNOUNCEMENTS,
                about: &[
                    "Somos una tienda de tecnología de sonido en Popayán con más de una década \
                     acompañando a músicos, DJs y eventos.",
                    "Trabajamos con las marcas líderes en audio profesional y ofrecemos asesoría \
                     personalizada antes y después de tu compra.",
                ],
                address: "Popayán, Cauca, Colombia",
                hero_type: "hero_item",
                promo_banner_type: "promo_banner",
                best_product_type: "best_product_poster",
                brand_banner_type: Some("banner_jbl_popayan"),
                custom_work: None,
            },
            StoreBrand::Steel => BrandProfile {
                brand: self,
                name: "Equimas",
                site_title: "Equimas | Equipos de Acero e Inoxidables",
                description: "Especialistas en equipos de acero: asadores, módulos a medida, \
                              hornos, ollas y estufas industriales. Calidad garantizada en toda \
                              Colombia.",
                announcements: ANNOUNCEMENTS,
                about: &[
                    "Fabricamos equipos de acero e inoxidable para cocinas de hogar y negocio.",
                    "Cada pieza se construye a la medida de tu espacio, con materiales de \
                     calidad superior.",
                ],
                address: "Colombia",
                hero_type: "hero_item",
                promo_banner_type: "promo_banner",
                best_product_type: "equimas_prueba_best_product",
                brand_banner_type: None,
                custom_work: Some(CustomWork {
                    title: "Fabricación sobre Medida",
                    subtitle: "Asadores, Parrillas, Accesorios, etc",
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brands_parse_from_aliases() {
        assert_eq!("audio".parse::<StoreBrand>().ok(), Some(StoreBrand::Audio));
        assert_eq!(" Equimas ".parse::<StoreBrand>().ok(), Some(StoreBrand::Steel));
        assert!("bakery".parse::<StoreBrand>().is_err());
    }

    #[test]
    fn only_the_audio_store_has_a_brand_banner() {
        assert!(StoreBrand::Audio.profile().brand_banner_type.is_some());
        assert!(StoreBrand::Steel.profile().brand_banner_type.is_none());
        assert!(StoreBrand::Steel.profile().custom_work.is_some());
    }
}
