//! Common constants used throughout the iron application.

/// Project configuration file, at the project root
pub const PROJECT_CONFIG_FILE: &str = "ironconfig.json";

/// Optional data-model template schema, System projects only
pub const TEMPLATE_SCHEMA_FILE: &str = "template.yml";

/// Rendered data-model template schema, in the output directory
pub const TEMPLATE_SCHEMA_OUTPUT: &str = "template.json";

/// Directory holding the language sources and their build output
pub const LANG_DIR: &str = "lang";

/// Package descriptor read into the render context as `pkg`
pub const PACKAGE_DESCRIPTOR_FILE: &str = "package.json";

/// Glob matching language source files inside [`LANG_DIR`]
pub const LANG_SOURCE_GLOB: &str = "*.yml";

/// Directory under the home directory holding Foundry VTT installs
pub const FOUNDRY_VERSIONS_DIR: &str = ".iron";

/// Entry under [`FOUNDRY_VERSIONS_DIR`] that is not an install
pub const FOUNDRY_SHARED_DATA_DIR: &str = "data";

/// Prefix every Foundry VTT timed download URL starts with
pub const FOUNDRY_RELEASES_URL: &str = "https://foundryvtt.s3.amazonaws.com/releases/";

/// Port Foundry VTT listens on unless told otherwise
pub const FOUNDRY_DEFAULT_PORT: u16 = 30000;

/// Version written into freshly initialized manifests
pub const INITIAL_VERSION: &str = "0.0.1";

/// Content of a new language file when there is no base language to copy
pub const DEFAULT_LANG_FILE: &str = "ACTOR.TypeCharacter: Player Character
ACTOR.TypeNpc: Non-Player Character

ITEM.TypeSpell: Spell
ITEM.TypeWeapon: Weapon
";

/// Entry script written by `iron script`
pub const MAIN_SCRIPT: &str = r#"Hooks.on("init", function() {
    console.log("This code runs once the Foundry VTT software begins its initialization workflow.");
});

Hooks.on("ready", function() {
    console.log("This code runs once core initialization is ready and game data is available.");
});
"#;

/// Skeleton `template.yml` written when a System project is initialized
pub const DEFAULT_TEMPLATE_SCHEMA: &str = "Actor:
  types:
    - character
    - npc
  templates: {}
  character: {}
  npc: {}
Item:
  types:
    - weapon
    - spell
  templates: {}
  weapon: {}
  spell: {}
";
