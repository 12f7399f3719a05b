use crate::error::{Error, Result};

/// NULL値を追跡するビットマスク
///
/// 1ビットが1行に対応し、ビットが立っている行がNAです。
/// 列と同じ長さを常に保ちます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMask {
    data: Vec<u8>,
    len: usize,
}

impl BitMask {
    /// すべてのビットが0のビットマスクを作成する
    pub fn zeros(length: usize) -> Self {
        Self {
            data: vec![0u8; (length + 7) / 8],
            len: length,
        }
    }

    /// すべてのビットが1のビットマスクを作成する
    pub fn ones(length: usize) -> Self {
        let mut data = vec![0xFFu8; (length + 7) / 8];

        // 不完全な最後のバイトを調整
        let remaining_bits = length % 8;
        if remaining_bits != 0 {
            if let Some(last) = data.last_mut() {
                *last &= (1u8 << remaining_bits) - 1;
            }
        }

        Self { data, len: length }
    }

    /// ブール値のスライスからビットマスクを作成する
    pub fn from_bools(bools: &[bool]) -> Self {
        let mut mask = Self::zeros(bools.len());
        for (i, &is_set) in bools.iter().enumerate() {
            if is_set {
                mask.set(i, true);
            }
        }
        mask
    }

    /// ビットが設定されているかどうかを確認する
    pub fn is_set(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                length: self.len,
            });
        }
        Ok(self.get(index))
    }

    /// 範囲はcallerが保証する
    #[inline]
    pub(crate) fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len);
        let bit = 1u8 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// 長さを変更する。新しいビットは `value` で埋める
    pub fn resize(&mut self, length: usize, value: bool) {
        let old = self.len;
        if length < old {
            self.data.truncate((length + 7) / 8);
            self.len = length;
            // 切り詰めた最後のバイトの余りビットを消す
            let remaining_bits = length % 8;
            if remaining_bits != 0 {
                if let Some(last) = self.data.last_mut() {
                    *last &= (1u8 << remaining_bits) - 1;
                }
            }
        } else {
            self.data.resize((length + 7) / 8, 0);
            self.len = length;
            if value {
                for i in old..length {
                    self.set(i, true);
                }
            }
        }
    }

    /// 指定された行を順に取り出した新しいビットマスク
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        let mut mask = Self::zeros(rows.len());
        for (i, &row) in rows.iter().enumerate() {
            if self.get(row) {
                mask.set(i, true);
            }
        }
        mask
    }

    /// 後ろに連結する
    pub fn extend(&mut self, other: &BitMask) {
        let start = self.len;
        self.resize(start + other.len, false);
        for i in other.iter_set() {
            self.set(start + i, true);
        }
    }

    /// 立っているビットの位置
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn any(&self) -> bool {
        self.data.iter().any(|&b| b != 0)
    }

    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    /// ビットマスクの長さを返す
    pub fn len(&self) -> usize {
        self.len
    }

    /// ビットマスクが空かどうかを返す
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_set_checks_range() {
        let mask = BitMask::from_bools(&[false, true]);
        assert!(!mask.is_set(0).unwrap());
        assert!(mask.is_set(1).unwrap());
        assert!(matches!(
            mask.is_set(2),
            Err(Error::IndexOutOfRange { index: 2, length: 2 })
        ));
    }

    #[test]
    fn test_ones_masks_tail_bits() {
        let mask = BitMask::ones(10);
        assert_eq!(mask.count_ones(), 10);
        assert!(mask.get(9));
    }

    #[test]
    fn test_resize_shrink_then_grow_clears_stale_bits() {
        let mut mask = BitMask::ones(12);
        mask.resize(3, false);
        assert_eq!(mask.count_ones(), 3);
        mask.resize(12, false);
        assert_eq!(mask.count_ones(), 3);
        assert!(!mask.get(5));
        mask.resize(14, true);
        assert!(mask.get(13));
        assert_eq!(mask.count_ones(), 5);
    }

    #[test]
    fn test_take_and_extend() {
        let mask = BitMask::from_bools(&[true, false, true]);
        let taken = mask.take(&[2, 2, 1]);
        assert_eq!(taken.to_bools(), vec![true, true, false]);

        let mut left = BitMask::from_bools(&[false, true]);
        left.extend(&taken);
        assert_eq!(left.to_bools(), vec![false, true, true, true, false]);
    }
}
