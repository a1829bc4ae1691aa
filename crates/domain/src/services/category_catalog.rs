//! Standard artist categories and their field schemas.
//!
//! Used by the startup seeder to populate an empty category table.

use crate::models::artist_category::CreateCategoryRequest;
use crate::models::field_definition::DefineFieldRequest;
use crate::models::field_type::FieldType;
use crate::models::field_type::FieldType::{
    Boolean, File, MultiSelect, Select, Text, Textarea, Url,
};

/// Seed data for one category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySeed {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub sort_order: i32,
    pub fields: &'static [FieldSeed],
}

/// Seed data for one field definition.
#[derive(Debug, Clone, Copy)]
pub struct FieldSeed {
    pub field_name: &'static str,
    pub display_name: &'static str,
    pub field_type: FieldType,
    pub is_required: bool,
    pub is_searchable: bool,
    pub sort_order: i32,
    pub placeholder: Option<&'static str>,
    pub help_text: &'static str,
    pub options: &'static [&'static str],
}

impl CategorySeed {
    pub fn to_request(&self) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: self.name.to_string(),
            display_name: self.display_name.to_string(),
            description: Some(self.description.to_string()),
            sort_order: self.sort_order,
        }
    }
}

impl FieldSeed {
    pub fn to_request(&self) -> DefineFieldRequest {
        DefineFieldRequest {
            field_name: self.field_name.to_string(),
            display_name: self.display_name.to_string(),
            field_type: self.field_type,
            is_required: self.is_required,
            is_searchable: self.is_searchable,
            sort_order: self.sort_order,
            placeholder: self.placeholder.map(str::to_string),
            help_text: Some(self.help_text.to_string()),
            options: self
                .field_type
                .has_options()
                .then(|| self.options.iter().map(|o| o.to_string()).collect()),
            validation_rules: None,
        }
    }
}

const EXPERIENCE_YEARS: &[&str] = &["LESS_THAN_1", "1_TO_3", "3_TO_5", "5_TO_10", "MORE_THAN_10"];
const LANGUAGES: &[&str] = &[
    "ENGLISH", "HINDI", "TAMIL", "TELUGU", "KANNADA", "MALAYALAM", "MARATHI", "BENGALI",
    "GUJARATI", "PUNJABI", "URDU", "OTHER",
];
const HAIR_COLORS: &[&str] = &["BLACK", "BROWN", "BLONDE", "RED", "GREY", "OTHER"];
const EYE_COLORS: &[&str] = &["BLACK", "BROWN", "HAZEL", "GREEN", "BLUE", "GREY"];
const MUSIC_GENRES: &[&str] = &[
    "BOLLYWOOD", "CLASSICAL", "POP", "ROCK", "JAZZ", "HIP_HOP", "ELECTRONIC", "FOLK", "SUFI",
    "DEVOTIONAL",
];
const INSTRUMENTS: &[&str] = &[
    "GUITAR", "BASS", "DRUMS", "KEYBOARD", "TABLA", "SITAR", "FLUTE", "VIOLIN", "HARMONIUM",
    "OTHER",
];
const AUDIO_EQUIPMENT: &[&str] = &[
    "MIXER", "CONTROLLER", "TURNTABLES", "PA_SYSTEM", "MONITORS", "MICROPHONES", "LIGHTING",
];
const CAMERA_EQUIPMENT: &[&str] = &[
    "DSLR", "MIRRORLESS", "CINEMA_CAMERA", "DRONE", "GIMBAL", "LIGHTING_KIT", "AUDIO_KIT",
];
const PHOTO_SOFTWARE: &[&str] = &["LIGHTROOM", "PHOTOSHOP", "CAPTURE_ONE", "GIMP", "OTHER"];
const VIDEO_SOFTWARE: &[&str] = &[
    "PREMIERE_PRO", "FINAL_CUT_PRO", "DAVINCI_RESOLVE", "AFTER_EFFECTS", "OTHER",
];

const fn field(
    field_name: &'static str,
    display_name: &'static str,
    field_type: FieldType,
    is_required: bool,
    is_searchable: bool,
    sort_order: i32,
    help_text: &'static str,
) -> FieldSeed {
    FieldSeed {
        field_name,
        display_name,
        field_type,
        is_required,
        is_searchable,
        sort_order,
        placeholder: None,
        help_text,
        options: &[],
    }
}

const fn with_options(seed: FieldSeed, options: &'static [&'static str]) -> FieldSeed {
    FieldSeed { options, ..seed }
}

const fn with_placeholder(seed: FieldSeed, placeholder: &'static str) -> FieldSeed {
    FieldSeed {
        placeholder: Some(placeholder),
        ..seed
    }
}

const ACTOR_FIELDS: &[FieldSeed] = &[
    with_placeholder(field("height", "Height", Text, true, true, 1, "Height in centimeters"), "cm"),
    with_placeholder(field("weight", "Weight", Text, false, true, 2, "Weight in kilograms"), "kg"),
    with_options(
        field("body_type", "Body Type", Select, false, true, 3, "Body type category"),
        &["SLIM", "ATHLETIC", "AVERAGE", "MUSCULAR", "PLUS_SIZE"],
    ),
    with_options(
        field("hair_color", "Hair Color", Select, false, true, 4, "Natural hair color"),
        HAIR_COLORS,
    ),
    with_options(field("eye_color", "Eye Color", Select, false, true, 5, "Eye color"), EYE_COLORS),
    with_options(
        field("skin_tone", "Skin Tone", Select, false, true, 6, "Skin tone category"),
        &["FAIR", "WHEATISH", "MEDIUM", "OLIVE", "DUSKY", "DARK"],
    ),
    with_options(
        field("languages", "Languages Known", MultiSelect, true, true, 7, "Languages you can perform in"),
        LANGUAGES,
    ),
    with_options(
        field("acting_experience", "Acting Experience", Select, true, true, 8, "Years of acting experience"),
        EXPERIENCE_YEARS,
    ),
    with_options(
        field("special_skills", "Special Skills", MultiSelect, false, true, 9, "Special acting skills (dancing, singing, etc.)"),
        &["DANCING", "SINGING", "MARTIAL_ARTS", "HORSE_RIDING", "SWIMMING", "STUNTS", "DRIVING", "IMPROV"],
    ),
    with_placeholder(field("demo_reel", "Demo Reel", Url, false, false, 10, "Link to your demo reel"), "https://"),
    field("headshots", "Headshots", File, true, false, 11, "Professional headshot photos"),
    field("resume", "Acting Resume", File, false, false, 12, "Your acting resume/CV"),
];

const DANCER_FIELDS: &[FieldSeed] = &[
    with_options(
        field("dance_styles", "Dance Styles", MultiSelect, true, true, 1, "Dance styles you specialize in"),
        &["BHARATANATYAM", "KATHAK", "ODISSI", "KUCHIPUDI", "BOLLYWOOD", "HIP_HOP", "CONTEMPORARY", "BALLET", "SALSA", "JAZZ"],
    ),
    field("training_background", "Training Background", Textarea, true, true, 2, "Your dance training and education"),
    with_options(
        field("performance_experience", "Performance Experience", Select, true, true, 3, "Years of performance experience"),
        EXPERIENCE_YEARS,
    ),
    field("choreography_skills", "Choreography Skills", Boolean, false, true, 4, "Can you create choreography?"),
    field("teaching_experience", "Teaching Experience", Boolean, false, true, 5, "Do you have teaching experience?"),
    field("performance_videos", "Performance Videos", File, true, false, 6, "Videos of your performances"),
    field("costume_availability", "Costume Availability", Boolean, false, false, 7, "Do you have your own costumes?"),
];

const SINGER_FIELDS: &[FieldSeed] = &[
    with_options(
        field("vocal_range", "Vocal Range", Select, true, true, 1, "Your vocal range"),
        &["SOPRANO", "MEZZO_SOPRANO", "ALTO", "TENOR", "BARITONE", "BASS"],
    ),
    with_options(
        field("music_genres", "Music Genres", MultiSelect, true, true, 2, "Genres you can perform"),
        MUSIC_GENRES,
    ),
    with_options(
        field("instruments", "Instruments", MultiSelect, false, true, 3, "Instruments you can play"),
        INSTRUMENTS,
    ),
    field("recording_experience", "Recording Experience", Boolean, false, true, 4, "Do you have recording experience?"),
    field("live_performance", "Live Performance", Boolean, true, true, 5, "Can you perform live?"),
    field("demo_tracks", "Demo Tracks", File, true, false, 6, "Your demo recordings"),
    field("original_compositions", "Original Compositions", Boolean, false, true, 7, "Do you write original music?"),
];

const DIRECTOR_FIELDS: &[FieldSeed] = &[
    with_options(
        field("directing_experience", "Directing Experience", Select, true, true, 1, "Years of directing experience"),
        EXPERIENCE_YEARS,
    ),
    with_options(
        field("project_types", "Project Types", MultiSelect, true, true, 2, "Types of projects you direct"),
        &["FEATURE_FILM", "SHORT_FILM", "TV_SERIES", "WEB_SERIES", "DOCUMENTARY", "COMMERCIAL", "MUSIC_VIDEO", "THEATER"],
    ),
    with_options(
        field("equipment_owned", "Equipment Owned", MultiSelect, false, true, 3, "Production equipment you own"),
        CAMERA_EQUIPMENT,
    ),
    with_options(
        field("team_size", "Team Size", Select, false, true, 4, "Size of teams you can manage"),
        &["1_TO_5", "6_TO_20", "21_TO_50", "MORE_THAN_50"],
    ),
    with_placeholder(field("portfolio", "Portfolio", Url, true, false, 5, "Link to your directing portfolio"), "https://"),
    field("awards", "Awards", Textarea, false, false, 6, "Awards and recognitions received"),
];

const WRITER_FIELDS: &[FieldSeed] = &[
    with_options(
        field("writing_experience", "Writing Experience", Select, true, true, 1, "Years of writing experience"),
        EXPERIENCE_YEARS,
    ),
    with_options(
        field("writing_types", "Writing Types", MultiSelect, true, true, 2, "Types of content you write"),
        &["SCREENPLAY", "DIALOGUE", "LYRICS", "STORY", "WEB_CONTENT", "ADVERTISING_COPY", "PLAYS"],
    ),
    with_options(
        field("languages", "Languages", MultiSelect, true, true, 3, "Languages you write in"),
        LANGUAGES,
    ),
    field("published_works", "Published Works", Textarea, false, false, 4, "List of your published works"),
    field("writing_samples", "Writing Samples", File, true, false, 5, "Samples of your writing work"),
];

const DJ_RJ_FIELDS: &[FieldSeed] = &[
    with_options(
        field("music_genres", "Music Genres", MultiSelect, true, true, 1, "Genres you can DJ"),
        MUSIC_GENRES,
    ),
    with_options(
        field("equipment_owned", "Equipment Owned", MultiSelect, false, true, 2, "DJ equipment you own"),
        AUDIO_EQUIPMENT,
    ),
    with_options(
        field("venue_experience", "Venue Experience", MultiSelect, true, true, 3, "Types of venues you've performed at"),
        &["CLUB", "WEDDING", "CORPORATE", "FESTIVAL", "RADIO", "PRIVATE_PARTY"],
    ),
    with_options(
        field("mixing_skills", "Mixing Skills", Select, true, true, 4, "Your mixing skill level"),
        &["BEGINNER", "INTERMEDIATE", "ADVANCED", "PROFESSIONAL"],
    ),
    field("demo_mix", "Demo Mix", File, true, false, 5, "Your demo mix recording"),
];

const BAND_FIELDS: &[FieldSeed] = &[
    with_options(
        field("band_size", "Band Size", Select, true, true, 1, "Number of band members"),
        &["DUO", "TRIO", "4_TO_6", "7_TO_10", "MORE_THAN_10"],
    ),
    with_options(
        field("music_genres", "Music Genres", MultiSelect, true, true, 2, "Genres your band performs"),
        MUSIC_GENRES,
    ),
    with_options(
        field("instruments", "Instruments", MultiSelect, true, true, 3, "Instruments in your band"),
        INSTRUMENTS,
    ),
    with_options(
        field("performance_experience", "Performance Experience", Select, true, true, 4, "Years of band performance experience"),
        EXPERIENCE_YEARS,
    ),
    field("original_songs", "Original Songs", Boolean, false, true, 5, "Do you perform original compositions?"),
    field("demo_tracks", "Demo Tracks", File, true, false, 6, "Your band's demo recordings"),
    with_options(
        field("equipment_owned", "Equipment Owned", MultiSelect, false, true, 7, "Sound equipment your band owns"),
        AUDIO_EQUIPMENT,
    ),
];

const MODEL_FIELDS: &[FieldSeed] = &[
    with_placeholder(field("height", "Height", Text, true, true, 1, "Height in centimeters"), "cm"),
    with_placeholder(field("weight", "Weight", Text, false, true, 2, "Weight in kilograms"), "kg"),
    field("body_measurements", "Body Measurements", Text, false, true, 3, "Bust-Waist-Hip measurements"),
    with_options(
        field("hair_color", "Hair Color", Select, false, true, 4, "Current hair color"),
        HAIR_COLORS,
    ),
    with_options(field("eye_color", "Eye Color", Select, false, true, 5, "Eye color"), EYE_COLORS),
    with_options(
        field("modeling_types", "Modeling Types", MultiSelect, true, true, 6, "Types of modeling you do"),
        &["FASHION", "COMMERCIAL", "RUNWAY", "PRINT", "FITNESS", "PARTS", "BRIDAL"],
    ),
    with_placeholder(field("portfolio", "Portfolio", Url, true, false, 7, "Link to your modeling portfolio"), "https://"),
    field("comp_cards", "Comp Cards", File, false, false, 8, "Your composite cards"),
];

const PHOTOGRAPHER_FIELDS: &[FieldSeed] = &[
    with_options(
        field("photography_types", "Photography Types", MultiSelect, true, true, 1, "Types of photography you specialize in"),
        &["WEDDING", "FASHION", "PORTRAIT", "PRODUCT", "EVENT", "WILDLIFE", "STREET", "ARCHITECTURE"],
    ),
    with_options(
        field("equipment_owned", "Equipment Owned", MultiSelect, false, true, 2, "Photography equipment you own"),
        CAMERA_EQUIPMENT,
    ),
    with_options(
        field("editing_software", "Editing Software", MultiSelect, false, true, 3, "Photo editing software you use"),
        PHOTO_SOFTWARE,
    ),
    with_placeholder(field("portfolio", "Portfolio", Url, true, false, 4, "Link to your photography portfolio"), "https://"),
    field("studio_available", "Studio Available", Boolean, false, true, 5, "Do you have access to a studio?"),
];

const VIDEOGRAPHER_FIELDS: &[FieldSeed] = &[
    with_options(
        field("video_types", "Video Types", MultiSelect, true, true, 1, "Types of videos you create"),
        &["WEDDING", "CORPORATE", "MUSIC_VIDEO", "DOCUMENTARY", "COMMERCIAL", "EVENT", "SOCIAL_MEDIA"],
    ),
    with_options(
        field("equipment_owned", "Equipment Owned", MultiSelect, false, true, 2, "Video equipment you own"),
        CAMERA_EQUIPMENT,
    ),
    with_options(
        field("editing_software", "Editing Software", MultiSelect, false, true, 3, "Video editing software you use"),
        VIDEO_SOFTWARE,
    ),
    with_placeholder(field("portfolio", "Portfolio", Url, true, false, 4, "Link to your video portfolio"), "https://"),
    field("drone_license", "Drone License", Boolean, false, true, 5, "Do you have a drone pilot license?"),
];

const STANDARD_CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        name: "ACTOR",
        display_name: "Actor",
        description: "Film, TV, and Theater Actors",
        sort_order: 1,
        fields: ACTOR_FIELDS,
    },
    CategorySeed {
        name: "DANCER",
        display_name: "Dancer",
        description: "Professional Dancers",
        sort_order: 2,
        fields: DANCER_FIELDS,
    },
    CategorySeed {
        name: "SINGER",
        display_name: "Singer",
        description: "Vocal Artists and Musicians",
        sort_order: 3,
        fields: SINGER_FIELDS,
    },
    CategorySeed {
        name: "DIRECTOR",
        display_name: "Director",
        description: "Film, TV, and Theater Directors",
        sort_order: 4,
        fields: DIRECTOR_FIELDS,
    },
    CategorySeed {
        name: "WRITER",
        display_name: "Writer",
        description: "Script Writers, Content Writers",
        sort_order: 5,
        fields: WRITER_FIELDS,
    },
    CategorySeed {
        name: "DJ_RJ",
        display_name: "DJ/RJ",
        description: "Disc Jockeys and Radio Jockeys",
        sort_order: 6,
        fields: DJ_RJ_FIELDS,
    },
    CategorySeed {
        name: "BAND",
        display_name: "Band",
        description: "Musical Bands and Groups",
        sort_order: 7,
        fields: BAND_FIELDS,
    },
    CategorySeed {
        name: "MODEL",
        display_name: "Model",
        description: "Fashion and Commercial Models",
        sort_order: 8,
        fields: MODEL_FIELDS,
    },
    CategorySeed {
        name: "PHOTOGRAPHER",
        display_name: "Photographer",
        description: "Professional Photographers",
        sort_order: 9,
        fields: PHOTOGRAPHER_FIELDS,
    },
    CategorySeed {
        name: "VIDEOGRAPHER",
        display_name: "Videographer",
        description: "Video Production Specialists",
        sort_order: 10,
        fields: VIDEOGRAPHER_FIELDS,
    },
];

/// The standard categories, in display order.
pub fn standard_categories() -> &'static [CategorySeed] {
    STANDARD_CATEGORIES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use validator::Validate;

    #[test]
    fn test_ten_standard_categories() {
        let names: Vec<&str> = standard_categories().iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "ACTOR");
        assert_eq!(names[9], "VIDEOGRAPHER");
    }

    #[test]
    fn test_every_seed_is_a_valid_definition() {
        for category in standard_categories() {
            assert!(category.to_request().validate().is_ok(), "{}", category.name);

            let mut names = HashSet::new();
            for seed in category.fields {
                let req = seed.to_request();
                assert!(req.validate().is_ok(), "{}.{}", category.name, seed.field_name);
                assert!(req.constraints().is_ok(), "{}.{}", category.name, seed.field_name);
                assert!(names.insert(seed.field_name), "duplicate {}", seed.field_name);
            }
        }
    }

    #[test]
    fn test_actor_schema_shape() {
        let actor = &standard_categories()[0];
        let height = actor.fields.iter().find(|f| f.field_name == "height").unwrap();
        assert!(height.is_required);
        assert_eq!(height.placeholder, Some("cm"));

        let body_type = actor.fields.iter().find(|f| f.field_name == "body_type").unwrap();
        assert!(body_type.options.contains(&"ATHLETIC"));
        assert!(!body_type.is_required);
    }
}
