//! Level files
//!
//! Levels are plain text, one directive per line, fields separated by `~`.
//! The first character of the first field selects the directive:
//!
//! ```text
//! !~<timelimit>~<fuel>~<x>~<y>~<angle>~<description>   ship start and title
//! N~<TYPE>[~<id>]                                      start a new object
//! L~<x0>~<y0>~<x1>~<y1>~<r>~<g>~<b>[~<thickness>]      add a line
//! P~<x>~<y>                                            set the object position
//! T~<text>~<r>~<g>~<b>[~<thickness>]                   build the object from text
//! M~<dx>~<dy>~<xmax>~<ymax>~<rotdelta>[~<gravity>]     oscillate the object
//! ```
//!
//! Everything after an `N` line applies to that object until the next `N`.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{AmazeError, Result};
use crate::sim::{Colour, GameShape, GameShapeType, Motion, ShapeLine};

/// Name of the directory holding level files
pub const DATA_DIR_NAME: &str = "data";

const DEFAULT_LINE_THICKNESS: u32 = 1;
const DEFAULT_TEXT_THICKNESS: u32 = 6;

/// Where and which way the ship starts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipStart {
    pub x: f64,
    pub y: f64,
    /// Degrees, 0 = up
    pub rotation: f64,
}

/// One piece of an object's outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(ShapeLine),
    /// Replaces everything added before it
    Text {
        text: String,
        colour: Colour,
        thickness: u32,
    },
}

/// Description of one level object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub kind: GameShapeType,
    /// Optional identifier from the `N` line
    pub id: Option<String>,
    pub position: Option<DVec2>,
    pub geometry: Vec<Geometry>,
    pub motion: Option<Motion>,
}

impl ObjectDescriptor {
    fn new(kind: GameShapeType, id: Option<String>) -> Self {
        Self {
            kind,
            id,
            ..Self::default()
        }
    }

    /// Build the game shape this descriptor describes
    pub fn build(&self) -> GameShape {
        let name = self
            .id
            .clone()
            .unwrap_or_else(|| format!("{:?}", self.kind));
        let mut gs = GameShape::new(self.kind, name);

        for item in &self.geometry {
            match item {
                Geometry::Line(line) => gs.shape.add_shape_line(*line),
                Geometry::Text {
                    text,
                    colour,
                    thickness,
                } => gs.shape.make_from_text(text, *colour, *thickness),
            }
        }
        if let Some(pos) = self.position {
            gs.shape.pos = pos;
        }
        if let Some(motion) = self.motion {
            // Moving objects rotate about their middle
            gs.shape.set_pos_from_centre();
            gs.motion = Some(motion);
        }
        gs
    }
}

/// A parsed level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelData {
    pub description: String,
    pub ship_start: ShipStart,
    pub objects: Vec<ObjectDescriptor>,
}

/// File name of a level number, e.g. `level3.cfg`
pub fn level_file_name(level: usize) -> String {
    format!("level{}.cfg", level)
}

/// Field access with error context for one line
struct LineParser<'a> {
    file: &'a str,
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> LineParser<'a> {
    fn error(&self, message: String) -> AmazeError {
        AmazeError::Parse {
            file: self.file.to_string(),
            line: self.line,
            message,
        }
    }

    fn text(&self, idx: usize) -> &'a str {
        self.fields.get(idx).copied().unwrap_or("")
    }

    fn num<T: FromStr>(&self, idx: usize) -> Result<T> {
        let raw = self.text(idx).trim();
        raw.parse()
            .map_err(|_| self.error(format!("invalid number '{}' in field {}", raw, idx)))
    }

    fn colour(&self, first: usize) -> Result<Colour> {
        Ok(Colour::rgb(
            self.num(first)?,
            self.num(first + 1)?,
            self.num(first + 2)?,
        ))
    }

    fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Parse level text. `file_name` is only used in error messages.
pub fn parse_level(text: &str, file_name: &str) -> Result<LevelData> {
    let mut level = LevelData::default();
    let mut current: Option<ObjectDescriptor> = None;

    for (idx, raw) in text.lines().enumerate() {
        let raw = raw.trim_end_matches('\r');
        let p = LineParser {
            file: file_name,
            line: idx + 1,
            fields: raw.split('~').collect(),
        };
        let Some(directive) = p.text(0).chars().next() else {
            continue;
        };

        match directive {
            '!' => {
                if p.len() < 7 {
                    log::warn!("{}:{}: short ship start line skipped", file_name, p.line);
                    continue;
                }
                level.ship_start = ShipStart {
                    x: p.num(3)?,
                    y: p.num(4)?,
                    rotation: p.num(5)?,
                };
                level.description = p.text(6).to_string();
            }
            'N' => {
                if let Some(obj) = current.take() {
                    level.objects.push(obj);
                }
                let kind = if p.len() > 1 {
                    GameShapeType::from_level_name(p.text(1).trim())
                } else {
                    GameShapeType::Neutral
                };
                let id = (p.len() > 2).then(|| p.text(2).to_string());
                current = Some(ObjectDescriptor::new(kind, id));
            }
            'L' | 'P' | 'T' | 'M' => {
                let Some(obj) = current.as_mut() else {
                    log::warn!(
                        "{}:{}: '{}' before any object skipped",
                        file_name,
                        p.line,
                        directive
                    );
                    continue;
                };
                apply_object_directive(obj, directive, &p)?;
            }
            'C' => {
                return Err(p.error("copy directive is not supported".to_string()));
            }
            _ => {
                log::debug!("{}:{}: unknown directive skipped", file_name, p.line);
            }
        }
    }

    if let Some(obj) = current.take() {
        level.objects.push(obj);
    }
    Ok(level)
}

fn apply_object_directive(
    obj: &mut ObjectDescriptor,
    directive: char,
    p: &LineParser<'_>,
) -> Result<()> {
    match (directive, p.len()) {
        ('L', 8 | 9) => {
            let thickness = if p.len() == 9 {
                p.num(8)?
            } else {
                DEFAULT_LINE_THICKNESS
            };
            obj.geometry.push(Geometry::Line(ShapeLine::new(
                p.num(1)?,
                p.num(2)?,
                p.num(3)?,
                p.num(4)?,
                p.colour(5)?,
                thickness,
            )));
        }
        ('P', 3) => {
            obj.position = Some(DVec2::new(p.num(1)?, p.num(2)?));
        }
        ('T', 5 | 6) => {
            let thickness = if p.len() == 6 {
                p.num(5)?
            } else {
                DEFAULT_TEXT_THICKNESS
            };
            obj.geometry.push(Geometry::Text {
                text: p.text(1).to_string(),
                colour: p.colour(2)?,
                thickness,
            });
        }
        ('M', 6 | 7) if obj.kind != GameShapeType::Moving => {
            log::warn!(
                "{}:{}: motion on a {:?} object skipped",
                p.file,
                p.line,
                obj.kind
            );
        }
        ('M', 6 | 7) => {
            let gravity = if p.len() == 7 { p.num(6)? } else { 0.0 };
            obj.motion = Some(Motion {
                delta: DVec2::new(p.num(1)?, p.num(2)?),
                max_difference: DVec2::new(p.num(3)?, p.num(4)?),
                rotation_delta: p.num(5)?,
                gravity,
            });
        }
        _ => {
            log::warn!(
                "{}:{}: '{}' with {} fields skipped",
                p.file,
                p.line,
                directive,
                p.len()
            );
        }
    }
    Ok(())
}

/// Provider of level data
pub trait LevelSource {
    fn load(&self, level: usize) -> Result<LevelData>;
    /// Level numbers that can be loaded, ascending
    fn available_levels(&self) -> Vec<usize>;
}

/// Reads `level<N>.cfg` files from a directory
#[derive(Debug, Clone)]
pub struct DirLevelSource {
    dir: PathBuf,
}

impl DirLevelSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LevelSource for DirLevelSource {
    fn load(&self, level: usize) -> Result<LevelData> {
        let name = level_file_name(level);
        let path = self.dir.join(&name);
        let text = fs::read_to_string(&path).map_err(|source| AmazeError::Io {
            path: path.clone(),
            source,
        })?;
        let data = parse_level(&text, &name)?;
        log::info!(
            "Loaded {} ({} objects): {}",
            name,
            data.objects.len(),
            data.description
        );
        Ok(data)
    }

    fn available_levels(&self) -> Vec<usize> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut levels: Vec<usize> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                name.strip_prefix("level")?
                    .strip_suffix(".cfg")?
                    .parse()
                    .ok()
            })
            .collect();
        levels.sort_unstable();
        levels
    }
}

/// Look for a `data` directory holding `level0.cfg` in `start`, its parent
/// and its grandparent.
pub fn find_data_directory(start: &Path) -> Result<PathBuf> {
    let mut searched = Vec::new();
    for dir in start.ancestors().take(3) {
        let candidate = dir.join(DATA_DIR_NAME);
        if candidate.join(level_file_name(0)).is_file() {
            return Ok(candidate);
        }
        searched.push(candidate);
    }
    Err(AmazeError::DataDirNotFound { searched })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
!~0~0~1000~1900~0~First flight
N~OBSTRUCTION~wall1
L~0~0~100~0~255~0~0
L~0~0~0~100~255~0~0~4
P~10~20
N~FUEL
T~F~0~255~0
N~MOVING~spinner
L~-10~0~10~0~255~255~255
P~500~500
M~1~0~50~0~2~3.5
";

    #[test]
    fn test_parse_sample() {
        let level = parse_level(SAMPLE, "level0.cfg").unwrap();
        assert_eq!(level.description, "First flight");
        assert_eq!(
            level.ship_start,
            ShipStart {
                x: 1000.0,
                y: 1900.0,
                rotation: 0.0
            }
        );
        assert_eq!(level.objects.len(), 3);

        let wall = &level.objects[0];
        assert_eq!(wall.kind, GameShapeType::Obstruction);
        assert_eq!(wall.id.as_deref(), Some("wall1"));
        assert_eq!(wall.position, Some(DVec2::new(10.0, 20.0)));
        let thicknesses: Vec<_> = wall
            .geometry
            .iter()
            .map(|g| match g {
                Geometry::Line(l) => l.thickness,
                Geometry::Text { .. } => 0,
            })
            .collect();
        assert_eq!(thicknesses, vec![1, 4]);

        let fuel = &level.objects[1];
        assert_eq!(fuel.kind, GameShapeType::Fuel);
        assert_eq!(fuel.id, None);
        assert!(matches!(
            fuel.geometry[0],
            Geometry::Text { thickness: 6, .. }
        ));

        let motion = level.objects[2].motion.unwrap();
        assert_eq!(motion.delta, DVec2::new(1.0, 0.0));
        assert_eq!(motion.max_difference, DVec2::new(50.0, 0.0));
        assert_eq!(motion.rotation_delta, 2.0);
        assert_eq!(motion.gravity, 3.5);
    }

    #[test]
    fn test_unknown_type_is_neutral() {
        let level = parse_level("N~SCENERY\nL~0~0~1~1~1~1~1\n", "x.cfg").unwrap();
        assert_eq!(level.objects[0].kind, GameShapeType::Neutral);
    }

    #[test]
    fn test_skip_rules() {
        let text = "\
# comment
L~0~0~1~1~1~1~1

N~EXIT
L~0~0~1~1
P~1~2~3
Q~whatever
!~short
";
        let level = parse_level(text, "x.cfg").unwrap();
        assert_eq!(level.objects.len(), 1);
        assert!(level.objects[0].geometry.is_empty());
        assert_eq!(level.objects[0].position, None);
        assert_eq!(level.description, "");
    }

    #[test]
    fn test_motion_only_on_moving_objects() {
        let text = "N~OBSTRUCTION~w\nP~100~100\nM~2~0~0~0~0~50\nN~MOVING~m\nM~2~0~0~0~0~50\n";
        let level = parse_level(text, "x.cfg").unwrap();
        assert_eq!(level.objects[0].motion, None);
        assert_eq!(level.objects[0].build().gravity(), 0.0);
        assert_eq!(level.objects[1].motion.map(|m| m.gravity), Some(50.0));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let text = "N~OBSTRUCTION\nL~0~0~1~1~1~1~1\nL~0~zero~1~1~1~1~1\n";
        let err = parse_level(text, "level7.cfg").unwrap_err();
        match err {
            AmazeError::Parse { file, line, message } => {
                assert_eq!(file, "level7.cfg");
                assert_eq!(line, 3);
                assert!(message.contains("zero"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_colour_out_of_range_is_error() {
        let err = parse_level("N~FUEL\nT~A~300~0~0\n", "x.cfg").unwrap_err();
        assert!(matches!(err, AmazeError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_copy_directive_rejected() {
        let err = parse_level("N~FUEL\nC~other\n", "x.cfg").unwrap_err();
        assert!(err.to_string().contains("x.cfg:2"));
    }

    #[test]
    fn test_build_moving_object_is_centred() {
        let level = parse_level(SAMPLE, "level0.cfg").unwrap();
        let gs = level.objects[2].build();
        assert_eq!(gs.name, "spinner");
        assert_eq!(gs.kind, GameShapeType::Moving);
        assert_eq!(gs.shape.pos, DVec2::new(500.0, 500.0));
        assert_eq!(gs.gravity(), 3.5);

        let wall = level.objects[0].build();
        assert_eq!(wall.shape.pos, DVec2::new(10.0, 20.0));
        assert_eq!(wall.shape.lines().len(), 2);
    }

    #[test]
    fn test_level_data_serializes() {
        let level = parse_level(SAMPLE, "level0.cfg").unwrap();
        let json = serde_json::to_string(&level).unwrap();
        let back: LevelData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }

    #[test]
    fn test_dir_source_and_data_search() {
        let root = std::env::temp_dir().join(format!("amaze-level-test-{}", std::process::id()));
        let data = root.join(DATA_DIR_NAME);
        let bin = root.join("target").join("release");
        fs::create_dir_all(&data).unwrap();
        fs::create_dir_all(&bin).unwrap();
        fs::write(data.join("level0.cfg"), SAMPLE).unwrap();
        fs::write(data.join("level2.cfg"), "!~0~0~5~5~90~Two\n").unwrap();
        fs::write(data.join("notes.txt"), "").unwrap();

        assert_eq!(find_data_directory(&bin).unwrap(), data);
        assert!(matches!(
            find_data_directory(&bin.join("deeper").join("still")),
            Err(AmazeError::DataDirNotFound { .. })
        ));

        let source = DirLevelSource::new(data.clone());
        assert_eq!(source.available_levels(), vec![0, 2]);
        assert_eq!(source.load(2).unwrap().ship_start.rotation, 90.0);
        assert!(matches!(source.load(1), Err(AmazeError::Io { .. })));

        fs::remove_dir_all(&root).unwrap();
    }
}
