//! # Assets
//!
//! The demos only ever see assets as byte blobs with a length: 16-bit
//! bitmaps for the backgrounds, 4-bit tiles and palettes for the sprites
//! and a raw 8-bit sample for the thrust sound. [`Assets`] bundles those
//! blobs. Converted art can be dropped in by building an `Assets` from
//! `include_bytes!` data; [`AssetBuffers`] draws stand-ins of the right
//! sizes so the demos run without any.
//!
//! ```ignore
//! static STAR_FIELD: &[u8] = include_bytes!("../gfx/starField.bin");
//! // ...
//! let assets = Assets { star_field: STAR_FIELD, ..buffers.assets() };
//! ```

use nds::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// 256×256 16-bit bitmap.
pub const STAR_FIELD_LEN: usize = 256 * 256 * 2;
/// 128×128 16-bit bitmap.
pub const PLANET_LEN: usize = 128 * 128 * 2;
/// One screen of 16-bit bitmap.
pub const SPLASH_LEN: usize = SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize * 2;
/// 64×64 at 4 bits per pixel.
pub const SHUTTLE_TILES_LEN: usize = 64 * 64 / 2;
/// 32×32 at 4 bits per pixel.
pub const MOON_TILES_LEN: usize = 32 * 32 / 2;
/// 16 colors.
pub const PALETTE_LEN: usize = 32;
/// A fifth of a second at 22050 Hz, 8 bits per sample.
pub const THRUST_LEN: usize = 22050 / 5;

/// Bitmap pixels are only drawn with this bit set.
const OPAQUE: u16 = 1 << 15;

/// 5-bit channels to a BGR555 color.
pub const fn rgb15(r: u8, g: u8, b: u8) -> u16 {
    (r as u16 & 0x1F) | ((g as u16 & 0x1F) << 5) | ((b as u16 & 0x1F) << 10)
}

/// Every blob a demo may copy into video or sound memory.
#[derive(Copy, Clone, Debug)]
pub struct Assets<'a> {
    pub star_field: &'a [u8],
    pub planet: &'a [u8],
    pub splash: &'a [u8],
    pub shuttle_tiles: &'a [u8],
    pub shuttle_palette: &'a [u8],
    pub moon_tiles: &'a [u8],
    pub moon_palette: &'a [u8],
    /// Signed 8-bit mono samples.
    pub thrust: &'a [u8],
}

/// Storage for generated placeholder assets.
pub struct AssetBuffers {
    star_field: [u8; STAR_FIELD_LEN],
    planet: [u8; PLANET_LEN],
    splash: [u8; SPLASH_LEN],
    shuttle_tiles: [u8; SHUTTLE_TILES_LEN],
    shuttle_palette: [u8; PALETTE_LEN],
    moon_tiles: [u8; MOON_TILES_LEN],
    moon_palette: [u8; PALETTE_LEN],
    thrust: [u8; THRUST_LEN],
}

impl AssetBuffers {
    /// Zeroed buffers. Call [`generate`](Self::generate) before use.
    pub const fn new() -> Self {
        Self {
            star_field: [0; STAR_FIELD_LEN],
            planet: [0; PLANET_LEN],
            splash: [0; SPLASH_LEN],
            shuttle_tiles: [0; SHUTTLE_TILES_LEN],
            shuttle_palette: [0; PALETTE_LEN],
            moon_tiles: [0; MOON_TILES_LEN],
            moon_palette: [0; PALETTE_LEN],
            thrust: [0; THRUST_LEN],
        }
    }

    /// Draw every placeholder.
    pub fn generate(&mut self) {
        star_field(&mut self.star_field);
        planet(&mut self.planet);
        splash(&mut self.splash);
        shuttle_tiles(&mut self.shuttle_tiles);
        write_palette(&mut self.shuttle_palette, &SHUTTLE_COLORS);
        moon_tiles(&mut self.moon_tiles);
        write_palette(&mut self.moon_palette, &MOON_COLORS);
        thrust(&mut self.thrust);
    }

    pub fn assets(&self) -> Assets<'_> {
        Assets {
            star_field: &self.star_field,
            planet: &self.planet,
            splash: &self.splash,
            shuttle_tiles: &self.shuttle_tiles,
            shuttle_palette: &self.shuttle_palette,
            moon_tiles: &self.moon_tiles,
            moon_palette: &self.moon_palette,
            thrust: &self.thrust,
        }
    }
}

impl Default for AssetBuffers {
    fn default() -> Self {
        Self::new()
    }
}

// color 0 is transparent in sprite palettes
const SHUTTLE_COLORS: [u16; 4] = [
    0,
    rgb15(31, 16, 0),  // hull
    rgb15(24, 8, 0),   // fins
    rgb15(12, 24, 31), // window
];

const MOON_COLORS: [u16; 3] = [0, rgb15(24, 24, 22), rgb15(16, 16, 15)];

fn write_palette(out: &mut [u8; PALETTE_LEN], colors: &[u16]) {
    out.fill(0);
    for (dst, color) in out.chunks_exact_mut(2).zip(colors) {
        dst.copy_from_slice(&color.to_le_bytes());
    }
}

/// Small deterministic generator, good enough for scattering stars.
struct XorShift(u32);

impl XorShift {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

fn put_pixel16(buf: &mut [u8], width: usize, x: usize, y: usize, color: u16) {
    let at = (y * width + x) * 2;
    buf[at..at + 2].copy_from_slice(&color.to_le_bytes());
}

/// Write a palette index into 1D-mapped 4-bit tiles of a sprite `width` wide.
fn put_pixel4(buf: &mut [u8], width: usize, x: usize, y: usize, index: u8) {
    let tile = (y / 8) * (width / 8) + x / 8;
    let at = tile * 32 + (y % 8) * 4 + (x % 8) / 2;
    if x % 2 == 0 {
        buf[at] = (buf[at] & 0xF0) | (index & 0x0F);
    } else {
        buf[at] = (buf[at] & 0x0F) | (index << 4);
    }
}

fn star_field(buf: &mut [u8; STAR_FIELD_LEN]) {
    let black = OPAQUE | rgb15(0, 0, 2);
    for px in buf.chunks_exact_mut(2) {
        px.copy_from_slice(&black.to_le_bytes());
    }

    let mut rng = XorShift(0x5EED_1234);
    for _ in 0..600 {
        let r = rng.next();
        let (x, y) = ((r & 0xFF) as usize, ((r >> 8) & 0xFF) as usize);
        let v = 16 + ((r >> 16) & 0x0F) as u8;
        put_pixel16(buf, 256, x, y, OPAQUE | rgb15(v, v, v));
    }
}

fn planet(buf: &mut [u8; PLANET_LEN]) {
    const R: i32 = 40;
    buf.fill(0);
    for y in 0..128 {
        for x in 0..128 {
            let (dx, dy) = (x as i32 - 64, y as i32 - 64);
            if dx * dx + dy * dy > R * R {
                continue;
            }
            // lit from the upper left
            let light = (R * 2 - dx - dy).clamp(0, R * 4) * 15 / (R * 4);
            let color = rgb15(8 + light as u8, 4 + light as u8 / 2, 2);
            put_pixel16(buf, 128, x, y, OPAQUE | color);
        }
    }
}

fn splash(buf: &mut [u8; SPLASH_LEN]) {
    let (w, h) = (SCREEN_WIDTH as usize, SCREEN_HEIGHT as usize);
    for y in 0..h {
        let t = (y * 31 / (h - 1)) as u8;
        let color = OPAQUE | rgb15(t, t / 2, 31 - t);
        for x in 0..w {
            put_pixel16(buf, w, x, y, color);
        }
    }
}

/// A ship with its nose pointing up, matching heading 0.
fn shuttle_tiles(buf: &mut [u8; SHUTTLE_TILES_LEN]) {
    buf.fill(0);
    for y in 4..60usize {
        let half = ((y - 4) / 4 + 1).min(10);
        for x in 32 - half..32 + half {
            put_pixel4(buf, 64, x, y, 1);
        }
        if y >= 44 {
            let fin = (y - 44) / 2 + 11;
            for x in (32 - fin..32 - half).chain(32 + half..32 + fin) {
                put_pixel4(buf, 64, x, y, 2);
            }
        }
    }
    for y in 16..24 {
        for x in 30..34 {
            put_pixel4(buf, 64, x, y, 3);
        }
    }
}

fn moon_tiles(buf: &mut [u8; MOON_TILES_LEN]) {
    const CRATERS: [(i32, i32, i32); 3] = [(10, 11, 4), (20, 18, 3), (13, 22, 2)];
    buf.fill(0);
    for y in 0..32 {
        for x in 0..32 {
            // centre at (15.5, 15.5), doubled to stay in integers
            let (dx, dy) = (2 * x as i32 - 31, 2 * y as i32 - 31);
            if dx * dx + dy * dy > 30 * 30 {
                continue;
            }
            let crater = CRATERS.iter().any(|&(cx, cy, r)| {
                let (ex, ey) = (x as i32 - cx, y as i32 - cy);
                ex * ex + ey * ey <= r * r
            });
            put_pixel4(buf, 32, x, y, if crater { 2 } else { 1 });
        }
    }
}

fn thrust(buf: &mut [u8; THRUST_LEN]) {
    let mut rng = XorShift(0x7410_0001);
    let n = buf.len() as i32;
    for (i, s) in buf.iter_mut().enumerate() {
        let envelope = (n - i as i32) * 100 / n;
        let noise = (rng.next() >> 24) as i32 - 128;
        *s = (noise * envelope / 100) as i8 as u8;
    }
}
