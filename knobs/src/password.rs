//! Secret values that are wiped from memory on release.
//!
//! A [`Password`] owns its characters exclusively. Releasing it, either
//! explicitly through [`Password::release`] or implicitly when it is dropped,
//! overwrites the buffer first with random characters and then with zeros
//! before marking the holder destroyed. Every state transition happens under
//! a single per-instance lock, so readers never observe a partially wiped
//! buffer. The lock is never held past the end of a call: readers receive a
//! copy that is zeroed when dropped.
//!
//! # Examples
//!
//! ```
//! use knobs::{Error, Password};
//!
//! let password = Password::try_from("secret").unwrap();
//! assert_eq!(password.expose(|chars| chars.iter().collect::<String>()).unwrap(), "secret");
//!
//! password.release();
//! assert!(password.is_destroyed());
//! assert!(matches!(password.get(), Err(Error::Destroyed)));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Process-wide source of wipe data.
///
/// Seeded from the operating system on first use, never torn down, and
/// shared by every [`Password`] behind a mutex.
static WIPE_RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| Mutex::new(StdRng::from_os_rng()));

/// Per-process salt mixed into every password hash.
static HASH_SALT: LazyLock<u64> = LazyLock::new(|| WIPE_RNG.lock().random());

struct State {
    chars: Vec<char>,
    destroyed: bool,
}

/// A secret held as a wipeable character buffer.
pub struct Password {
    state: Mutex<State>,
}

impl Password {
    /// Takes ownership of `chars` as a live secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `chars` is empty.
    pub fn new(chars: Vec<char>) -> Result<Self> {
        if chars.is_empty() {
            return Err(Error::invalid_argument("Empty password"));
        }
        Ok(Self {
            state: Mutex::new(State {
                chars,
                destroyed: false,
            }),
        })
    }

    /// Returns a copy of the live characters, zeroed when dropped.
    ///
    /// The copy is independent of this password: releasing one never
    /// affects the other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Destroyed`] if the password was released.
    pub fn get(&self) -> Result<Zeroizing<Vec<char>>> {
        let state = self.state.lock();
        if state.destroyed {
            return Err(Error::Destroyed);
        }
        Ok(Zeroizing::new(state.chars.clone()))
    }

    /// Runs `f` over a copy of the live characters.
    ///
    /// The copy is wiped as soon as `f` returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Destroyed`] if the password was released.
    pub fn expose<R>(&self, f: impl FnOnce(&[char]) -> R) -> Result<R> {
        let chars = self.get()?;
        Ok(f(&chars))
    }

    /// Wipes the buffer and marks the password destroyed.
    ///
    /// Calling this more than once is a no-op.
    pub fn release(&self) {
        self.release_with(|_| {});
    }

    /// Returns `true` once the password has been released.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    /// Releases the password, handing the scrambled buffer to
    /// `after_scramble` before the final zeroing pass.
    fn release_with(&self, after_scramble: impl FnOnce(&[char])) {
        let mut state = self.state.lock();
        if state.destroyed {
            return;
        }
        wipe(&mut state.chars, after_scramble);
        state.destroyed = true;
    }
}

/// Overwrites `buffer` with random characters, then with zeros.
fn wipe(buffer: &mut [char], after_scramble: impl FnOnce(&[char])) {
    {
        let mut rng = WIPE_RNG.lock();
        for slot in buffer.iter_mut() {
            *slot = rng.random();
        }
    }
    after_scramble(buffer);
    buffer.zeroize();
}

/// Compares two buffers without short-circuiting on the first difference.
fn constant_time_eq(left: &[char], right: &[char]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let diff = left
        .iter()
        .zip(right)
        .fold(0u32, |acc, (l, r)| acc | (u32::from(*l) ^ u32::from(*r)));
    std::hint::black_box(diff) == 0
}

impl TryFrom<&str> for Password {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value.chars().collect())
    }
}

impl TryFrom<String> for Password {
    type Error = Error;

    /// Copies the characters out of `value` and zeroes the source string.
    fn try_from(mut value: String) -> Result<Self> {
        let password = Self::new(value.chars().collect());
        value.zeroize();
        password
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.release();
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        // Lock in address order so two threads comparing a == b and b == a
        // cannot deadlock.
        let (first, second) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };
        let first = first.state.lock();
        let second = second.state.lock();

        if first.destroyed || second.destroyed {
            return false;
        }
        constant_time_eq(&first.chars, &second.chars)
    }
}

impl Eq for Password {}

impl Hash for Password {
    fn hash<H: Hasher>(&self, state: &mut H) {
        HASH_SALT.hash(state);
        let inner = self.state.lock();
        if !inner.destroyed {
            inner.chars.hash(state);
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::sync::Arc;
    use std::thread;

    fn hash_of(password: &Password) -> u64 {
        let mut hasher = DefaultHasher::new();
        password.hash(&mut hasher);
        hasher.finish()
    }

    fn secret() -> Vec<char> {
        "secret".chars().collect()
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = Password::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(Password::try_from("").is_err());
    }

    #[test]
    fn test_get_returns_original() {
        let password = Password::new(secret()).unwrap();
        assert_eq!(password.get().unwrap().as_slice(), secret().as_slice());
    }

    #[test]
    fn test_release_while_holding_copy() {
        let password = Password::new(secret()).unwrap();
        let chars = password.get().unwrap();

        password.release();
        assert!(password.is_destroyed());
        assert_eq!(chars.as_slice(), secret().as_slice());
    }

    #[test]
    fn test_copy_does_not_alias_buffer() {
        let password = Password::new(secret()).unwrap();
        let mut chars = password.get().unwrap();
        chars[0] = 'X';

        assert_eq!(password.get().unwrap().as_slice(), secret().as_slice());
    }

    #[test]
    fn test_compare_and_hash_while_holding_copy() {
        let a = Password::new(secret()).unwrap();
        let b = Password::new(secret()).unwrap();
        let _chars = a.get().unwrap();

        assert!(a == b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_expose_may_release() {
        let password = Password::new(secret()).unwrap();
        let len = password
            .expose(|chars| {
                password.release();
                chars.len()
            })
            .unwrap();

        assert_eq!(len, 6);
        assert!(password.is_destroyed());
    }

    #[test]
    fn test_release_destroys() {
        let password = Password::new(secret()).unwrap();
        assert!(!password.is_destroyed());

        password.release();
        assert!(password.is_destroyed());
        assert!(matches!(password.get(), Err(Error::Destroyed)));
        assert!(matches!(password.expose(|c| c.len()), Err(Error::Destroyed)));
    }

    #[test]
    fn test_release_is_idempotent() {
        let password = Password::new(secret()).unwrap();
        password.release();
        password.release();
        assert!(password.is_destroyed());
    }

    #[test]
    fn test_two_pass_wipe() {
        let original = secret();
        let password = Password::new(original.clone()).unwrap();

        let mut scrambled = Vec::new();
        password.release_with(|buffer| scrambled = buffer.to_vec());

        assert_eq!(scrambled.len(), original.len());
        assert_ne!(scrambled, original);
        assert!(scrambled.iter().any(|c| *c != '\0'));

        let state = password.state.lock();
        assert!(state.destroyed);
        assert!(state.chars.iter().all(|c| *c == '\0'));
    }

    #[test]
    fn test_second_release_does_not_rewipe() {
        let password = Password::new(secret()).unwrap();
        password.release();

        let mut called = false;
        password.release_with(|_| called = true);
        assert!(!called);
    }

    #[test]
    fn test_try_from_string() {
        let source = String::from("hunter2");
        let password = Password::try_from(source).unwrap();
        assert_eq!(
            password.expose(|c| c.iter().collect::<String>()).unwrap(),
            "hunter2"
        );
    }

    #[test]
    fn test_equality_while_live() {
        let a = Password::new(secret()).unwrap();
        let b = Password::new(secret()).unwrap();
        let c = Password::try_from("other").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_destroyed_never_equal() {
        let a = Password::new(secret()).unwrap();
        let b = Password::new(secret()).unwrap();
        assert_eq!(a, b);

        a.release();
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn test_destroyed_hash_ignores_contents() {
        let a = Password::new(secret()).unwrap();
        let b = Password::try_from("different").unwrap();
        a.release();
        b.release();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_debug_hides_contents() {
        let password = Password::new(secret()).unwrap();
        let debug = format!("{password:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("destroyed: false"));
    }

    #[test]
    fn test_concurrent_release_and_get() {
        let password = Arc::new(Password::new(secret()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let password = Arc::clone(&password);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        password.release();
                    } else if let Ok(chars) = password.get() {
                        // A reader sees either the full secret or nothing.
                        assert_eq!(chars.as_slice(), secret().as_slice());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(password.is_destroyed());
    }

    #[test]
    fn test_concurrent_cross_comparison() {
        let a = Arc::new(Password::new(secret()).unwrap());
        let b = Arc::new(Password::new(secret()).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let (a, b) = (Arc::clone(&a), Arc::clone(&b));
                thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            assert!(*a == *b);
                        } else {
                            assert!(*b == *a);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
