//! Fixed catalog inserted by the seed runner.

pub struct SeedCategory {
    pub slug: &'static str,
    pub name: &'static str,
}

pub struct SeedFacet {
    pub id: &'static str,
    pub name: &'static str,
}

pub struct SeedBanner {
    pub img: &'static str,
    pub link: &'static str,
}

pub struct SeedMetadataValue {
    pub id: &'static str,
    pub label: &'static str,
}

pub struct SeedImages {
    pub label: &'static str,
    pub urls: &'static [&'static str],
}

pub struct SeedProduct {
    pub label: &'static str,
    pub price_cents: i64,
    pub description: &'static str,
}

/// Its presence marks the database as already seeded.
pub static CATEGORY: SeedCategory = SeedCategory {
    slug: "camisas",
    name: "Camisas",
};

pub static FACET: SeedFacet = SeedFacet {
    id: "tech",
    name: "Tecnologia",
};

pub static BANNERS: &[SeedBanner] = &[
    SeedBanner {
        img: "banner_promo_1.jpg",
        link: "/categories/camisas",
    },
    SeedBanner {
        img: "banner_promo_2.jpg",
        link: "/categories/algo",
    },
];

pub static METADATA_VALUES: &[SeedMetadataValue] = &[
    SeedMetadataValue {
        id: "node",
        label: "Node",
    },
    SeedMetadataValue {
        id: "react",
        label: "React",
    },
    SeedMetadataValue {
        id: "javascript",
        label: "Javascript",
    },
    SeedMetadataValue {
        id: "react-native",
        label: "React Native",
    },
    SeedMetadataValue {
        id: "php",
        label: "PHP",
    },
];

pub static PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        label: "Camisa RN",
        price_cents: 8990,
        description: "Camisa com estampa de React Native, perfeita para desenvolvedores",
    },
    SeedProduct {
        label: "Camisa React",
        price_cents: 9450,
        description: "Camisa com logo do React, ideal para front-end developers",
    },
    SeedProduct {
        label: "Camisa NodeJS",
        price_cents: 8000,
        description: "Camisa Node, para quem gosta de javascript no backend",
    },
    SeedProduct {
        label: "Camisa JavaScript",
        price_cents: 6740,
        description: "Camisa com estampa de JavaScript, perfeita para quem ama a linguagem",
    },
    SeedProduct {
        label: "Camisa PHP",
        price_cents: 6990,
        description: "Camisa com estampa PHP, para desenvolvedores web",
    },
];

/// Image filenames per product label, in upload order.
pub static PRODUCT_IMAGES: &[SeedImages] = &[
    SeedImages {
        label: "Camisa RN",
        urls: &["camisa-rn-1.jpg", "camisa-rn-2.jpg"],
    },
    SeedImages {
        label: "Camisa React",
        urls: &["camisa-react-1.jpg", "camisa-react-2.jpg"],
    },
    SeedImages {
        label: "Camisa NodeJS",
        urls: &["camisa-nodejs-1.jpg", "camisa-nodejs-2.jpg"],
    },
    SeedImages {
        label: "Camisa JavaScript",
        urls: &["camisa-javascript-1.jpg", "camisa-javascript-2.jpg"],
    },
    SeedImages {
        label: "Camisa PHP",
        urls: &["camisa-php-1.jpg", "camisa-php-2.jpg"],
    },
];

/// Metadata value for the product at the same index in [`PRODUCTS`].
pub static PRODUCT_VALUE_IDS: &[&str] = &["react-native", "react", "node", "javascript", "php"];

pub fn images_for(label: &str) -> Option<&'static [&'static str]> {
    PRODUCT_IMAGES
        .iter()
        .find(|images| images.label == label)
        .map(|images| images.urls)
}
