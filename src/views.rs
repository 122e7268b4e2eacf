// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Page Rendering
//!
//! Server-rendered HTML for the landing page, the photographer list and the
//! per-photographer galleries. Pages are plain strings; every piece of
//! catalog data goes through [`escape_html`].
//!
//! The gallery pages carry the ambient layer: confetti seeded from
//! [`ConfettiField`] plus the music button. The frame constants are written
//! into `data-*` attributes so the in-page loop moves particles exactly like
//! [`Particle::step`](crate::ambient::Particle::step).


use crate::ambient::confetti::{
    ConfettiField, RESPAWN_Y, ROTATION_STEP, WRAP_MARGIN,
};
use crate::ambient::music::{DEFAULT_VOLUME, MUSIC_SRC};
use crate::gallery::{Catalog, PhotographerEntry};

pub const SITE_TITLE: &str = "Say Grace and Cheese";
pub const SITE_TAGLINE: &str = "Private Photography Gallery";

const BASE_CSS: &str = r#"
body { margin: 0; font-family: Montserrat, system-ui, sans-serif; color: #1c1c4a; }
.page { background: #ffdbdc; min-height: 100vh; padding: 1em; text-align: center; }
.title { font-family: Barriecito, cursive; font-size: 3.5em; letter-spacing: 4px; margin: 0.5em 0; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 2em; padding: 2em 0; }
.cheese { display: flex; flex-direction: column; align-items: center; text-decoration: none; color: inherit; transition: transform 0.2s ease; }
.cheese:hover { transform: scale(1.1); }
.cheese .icon { font-size: 6em; position: relative; }
.cheese .name { position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); font-size: 0.3em; font-weight: bold; }
.masonry { columns: 300px; column-gap: 1.5em; max-width: 1400px; margin: 0 auto 3em auto; }
.photo { break-inside: avoid; margin-bottom: 1.5em; cursor: pointer; background: #fff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 12px rgba(0,0,0,0.1); transition: transform 0.3s ease; }
.photo:hover { transform: translateY(-8px); }
.photo img { width: 100%; display: block; }
.photo p { margin: 0; padding: 1em; font-weight: 500; }
.back { display: inline-flex; gap: 0.5em; padding: 0.8em 1.5em; background: #1c1c4a; color: #fff; text-decoration: none; border-radius: 25px; }
.lightbox { position: fixed; inset: 0; background: rgba(0,0,0,0.9); display: none; align-items: center; justify-content: center; z-index: 1000; cursor: pointer; }
.lightbox.open { display: flex; }
.lightbox img { max-width: 90vw; max-height: 90vh; border-radius: 12px; }
.confetti { position: fixed; top: 0; left: 0; font-size: 32px; z-index: 1000; pointer-events: none; user-select: none; will-change: transform; }
.music { position: fixed; bottom: 2em; right: 2em; width: 60px; height: 60px; border-radius: 50%; background: #1c1c4a; color: #fff; border: none; font-size: 1.2em; cursor: pointer; z-index: 2000; }
"#;

const LANDING_SCRIPT: &str = r#"
const form = document.getElementById('gate');
const input = document.getElementById('passphrase');
const button = document.getElementById('enter');
const error = document.getElementById('error');
input.addEventListener('input', () => { button.disabled = !input.value.trim(); });
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  button.disabled = true;
  button.textContent = 'Checking...';
  error.textContent = '';
  try {
    const response = await fetch('/verify', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ passphrase: input.value })
    });
    if (response.ok) {
      window.location.href = '/photographers';
      return;
    }
    const data = await response.json();
    error.textContent = data.error || 'Incorrect password';
  } catch {
    error.textContent = 'Connection error. Please try again.';
  } finally {
    button.textContent = 'Enter Gallery';
    button.disabled = !input.value.trim();
  }
});
"#;

const LIGHTBOX_SCRIPT: &str = r#"
const lightbox = document.getElementById('lightbox');
const preview = lightbox.querySelector('img');
document.querySelectorAll('.photo').forEach((photo) => {
  photo.addEventListener('click', () => {
    preview.src = photo.dataset.src;
    preview.alt = photo.dataset.alt;
    lightbox.classList.add('open');
  });
});
const close = () => { lightbox.classList.remove('open'); preview.removeAttribute('src'); };
lightbox.addEventListener('click', close);
document.addEventListener('keydown', (event) => { if (event.key === 'Escape') close(); });
"#;

const AMBIENT_SCRIPT: &str = r#"
(() => {
  const layer = document.getElementById('ambient');
  const cfg = layer.dataset;
  const step = +cfg.step, margin = +cfg.margin, respawn = +cfg.respawn;
  const sx = window.innerWidth / +cfg.width, sy = window.innerHeight / +cfg.height;
  const pieces = [...layer.querySelectorAll('.confetti')].map((el) => ({
    el, x: +el.dataset.x * sx, y: +el.dataset.y * sy, r: +el.dataset.r,
    speed: +el.dataset.speed, drift: +el.dataset.drift
  }));
  let frame = 0;
  const tick = () => {
    for (const p of pieces) {
      p.y += p.speed; p.x += p.drift; p.r = (p.r + step) % 360;
      if (p.y > window.innerHeight + margin) { p.y = respawn; p.x = Math.random() * window.innerWidth; }
      p.el.style.transform = `translate(${p.x}px, ${p.y}px) rotate(${p.r}deg)`;
    }
    frame = requestAnimationFrame(tick);
  };
  frame = requestAnimationFrame(tick);
  window.addEventListener('pagehide', () => cancelAnimationFrame(frame));
  window.addEventListener('pageshow', (event) => {
    if (!event.persisted) return;
    cancelAnimationFrame(frame);
    frame = requestAnimationFrame(tick);
  });

  const audio = document.getElementById('ambient-music');
  const button = document.getElementById('music-toggle');
  let interacted = false;
  const render = (playing) => {
    button.textContent = playing ? '❚❚' : '▶';
    button.setAttribute('aria-label', playing ? 'Pause music' : 'Play music');
  };
  audio.volume = +cfg.volume;
  audio.addEventListener('play', () => render(true));
  audio.addEventListener('pause', () => render(false));
  audio.addEventListener('ended', () => render(false));
  button.addEventListener('click', () => {
    interacted = true;
    if (audio.paused) { audio.play().catch(() => {}); } else { audio.pause(); }
  });
  const onFirstInteraction = (event) => {
    if (event.target.closest && event.target.closest('button, input, textarea, select')) return;
    if (interacted || !audio.paused) return;
    audio.play().then(() => {
      interacted = true;
      document.removeEventListener('click', onFirstInteraction);
      document.removeEventListener('keydown', onFirstInteraction);
    }).catch(() => {});
  };
  document.addEventListener('click', onFirstInteraction);
  document.addEventListener('keydown', onFirstInteraction);
  setTimeout(() => { audio.play().then(() => { interacted = true; }).catch(() => {}); }, 100);
})();
"#;

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <meta name=\"description\" content=\"{tagline}\">\n\
         <title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        tagline = SITE_TAGLINE,
        title = escape_html(title),
        css = BASE_CSS,
    )
}

/// Landing page with the passphrase form.
pub fn landing_page() -> String {
    let body = format!(
        r#"<main class="page" style="display:flex;align-items:center;justify-content:center;background:#f8fafc">
<div style="background:#fff;padding:3rem;border-radius:0.5rem;box-shadow:0 10px 15px -3px rgba(0,0,0,0.1);min-width:min(400px,90vw)">
<h1 style="margin-bottom:0.5rem">{title}</h1>
<p style="color:#6b7280;margin-bottom:2rem">{tagline}</p>
<form id="gate">
<input id="passphrase" type="password" placeholder="Enter password" required autocomplete="current-password" style="width:100%;padding:0.75rem;box-sizing:border-box">
<button id="enter" type="submit" disabled style="width:100%;padding:0.75rem;margin-top:1.5rem">Enter Gallery</button>
<p id="error" role="alert" style="color:#dc2626"></p>
</form>
<p style="margin-top:2rem;font-size:0.75rem;color:#9ca3af">Access restricted to invited guests only</p>
</div>
</main>
<script>{script}</script>"#,
        title = SITE_TITLE,
        tagline = SITE_TAGLINE,
        script = LANDING_SCRIPT,
    );
    document(SITE_TITLE, &body)
}

/// List of photographers, each linking to their gallery.
pub fn photographers_page(catalog: &Catalog, confetti: &ConfettiField) -> String {
    let mut cards = String::new();
    for entry in catalog.entries() {
        cards.push_str(&format!(
            r#"<a class="cheese" href="{href}"><div class="icon">🧀<div class="name">{name}</div></div></a>"#,
            href = escape_html(&entry.page_path()),
            name = escape_html(&entry.name),
        ));
        cards.push('\n');
    }

    let body = format!(
        r#"<main class="page">
<h1 class="title">{title}</h1>
<p>Select a photographer to view their gallery:</p>
<div class="grid">
{cards}</div>
</main>
{ambient}"#,
        title = SITE_TITLE,
        ambient = ambient_layer(confetti),
    );
    document(SITE_TITLE, &body)
}

/// One photographer's photos with a lightbox viewer.
pub fn gallery_page(entry: &PhotographerEntry, confetti: &ConfettiField) -> String {
    let name = escape_html(&entry.name);

    let photos = if entry.photos.is_empty() {
        "<p>No photos available</p>".to_string()
    } else {
        let mut grid = String::from("<div class=\"masonry\">\n");
        for (index, photo) in entry.photos.iter().enumerate() {
            let src = escape_html(&entry.photo_url(photo));
            let alt = format!("{name} - {}", escape_html(photo));
            grid.push_str(&format!(
                r#"<figure class="photo" data-src="{src}" data-alt="{alt}"><img src="{src}" alt="{alt}" loading="lazy"><p>Photo {number}</p></figure>"#,
                number = index + 1,
            ));
            grid.push('\n');
        }
        grid.push_str("</div>");
        grid
    };

    let body = format!(
        r#"<main class="page">
<h1 class="title">{name}&#39;s Gallery</h1>
{photos}
<div class="lightbox" id="lightbox" role="dialog" aria-label="Photo preview"><img alt=""></div>
<p><a class="back" href="/photographers">&larr; Back to photographers</a></p>
</main>
<script>{lightbox}</script>
{ambient}"#,
        lightbox = LIGHTBOX_SCRIPT,
        ambient = ambient_layer(confetti),
    );
    document(&format!("{} - {SITE_TITLE}", entry.name), &body)
}

/// Simple error page.
pub fn error_page(code: u16, message: &str) -> String {
    let body = format!(
        r#"<main class="page">
<h1 class="title">{code}</h1>
<p>{message}</p>
<p><a class="back" href="/photographers">&larr; Back to photographers</a></p>
</main>"#,
        message = escape_html(message),
    );
    document(SITE_TITLE, &body)
}

/// Confetti particles, the audio element and the music button.
pub fn ambient_layer(confetti: &ConfettiField) -> String {
    let viewport = confetti.viewport();
    let mut layer = format!(
        r#"<div id="ambient" data-width="{width}" data-height="{height}" data-step="{step}" data-margin="{margin}" data-respawn="{respawn}" data-volume="{volume}">"#,
        width = viewport.width,
        height = viewport.height,
        step = ROTATION_STEP,
        margin = WRAP_MARGIN,
        respawn = RESPAWN_Y,
        volume = DEFAULT_VOLUME,
    );
    layer.push('\n');

    for particle in confetti.particles() {
        layer.push_str(&format!(
            r#"<div class="confetti" aria-hidden="true" data-x="{x:.2}" data-y="{y:.2}" data-r="{r:.2}" data-speed="{speed:.3}" data-drift="{drift:.3}" style="transform: translate({x:.2}px, {y:.2}px) rotate({r:.2}deg)">{symbol}</div>"#,
            x = particle.x,
            y = particle.y,
            r = particle.rotation,
            speed = particle.speed,
            drift = particle.drift,
            symbol = particle.symbol,
        ));
        layer.push('\n');
    }

    layer.push_str(&format!(
        r#"<audio id="ambient-music" src="{src}" loop preload="auto" playsinline hidden></audio>
<button id="music-toggle" class="music" type="button" aria-label="Play music">&#9654;</button>
</div>
<script>{script}</script>"#,
        src = MUSIC_SRC,
        script = AMBIENT_SCRIPT,
    ));
    layer
}
