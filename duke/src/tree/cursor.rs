/// A position inside of a descriptor or signature.
///
/// All positions are byte offsets into the text, and always lie on a `char` boundary.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
	text: &'a str,
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(text: &'a str) -> Cursor<'a> {
		Cursor { text, pos: 0 }
	}

	/// The complete text this cursor runs over.
	pub(crate) fn text(&self) -> &'a str {
		self.text
	}

	pub(crate) fn pos(&self) -> usize {
		self.pos
	}

	pub(crate) fn rest(&self) -> &'a str {
		&self.text[self.pos..]
	}

	pub(crate) fn is_at_end(&self) -> bool {
		self.pos == self.text.len()
	}

	pub(crate) fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	pub(crate) fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	/// Advances over `c` if it's the next char.
	pub(crate) fn eat(&mut self, c: char) -> bool {
		if self.peek() == Some(c) {
			self.pos += c.len_utf8();
			true
		} else {
			false
		}
	}

	/// Advances over all chars not in `stop`, returning them.
	pub(crate) fn take_until(&mut self, stop: &[char]) -> &'a str {
		let rest = self.rest();
		let len = rest.find(stop).unwrap_or(rest.len());
		self.pos += len;
		&rest[..len]
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::tree::cursor::Cursor;

	#[test]
	fn walk() {
		let mut cursor = Cursor::new("Lä/b<TT;>;");
		assert!(cursor.eat('L'));
		assert!(!cursor.eat('L'));
		assert_eq!(cursor.take_until(&[';', '<']), "ä/b");
		assert_eq!(cursor.bump(), Some('<'));
		assert_eq!(cursor.rest(), "TT;>;");
		assert_eq!(cursor.take_until(&['#']), "TT;>;");
		assert!(cursor.is_at_end());
		assert_eq!(cursor.bump(), None);
		assert_eq!(cursor.pos(), cursor.text().len());
	}
}
